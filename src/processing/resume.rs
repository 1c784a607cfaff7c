//! Resume parsing: work experience, education, and tenure structure
//!
//! Works over normalized text. Date ranges anchor the experience entries;
//! everything between two dated lines belongs to the earlier one.

use crate::processing::text;
use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub start_year: i32,
    pub end_year: i32,
    pub ongoing: bool,
    pub description: String,
}

impl WorkExperience {
    pub fn years(&self) -> f64 {
        (self.end_year - self.start_year).max(0) as f64
    }

    /// Years since the role ended, relative to `now_year`. Zero for ongoing
    /// roles.
    pub fn recency(&self, now_year: i32) -> i32 {
        if self.ongoing {
            0
        } else {
            (now_year - self.end_year).max(0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub credential: String,
}

/// Structured view of a resume used by the category scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub normalized_text: String,
    pub experiences: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub total_years: f64,
    pub now_year: i32,
}

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "mba",
    "phd",
    "doctorate",
    "associate",
    "certificate",
    "certification",
];

impl ResumeProfile {
    pub fn parse(raw_text: &str) -> Self {
        let normalized = text::normalize(raw_text);
        let now_year = Utc::now().year();
        let mut experiences = Self::extract_experiences(&normalized, now_year);
        // Most recent first; scorers rely on this order for title matching.
        experiences.sort_by(|a, b| b.end_year.cmp(&a.end_year));

        let education = Self::extract_education(&normalized);
        let total_years = experiences.iter().map(|e| e.years()).sum();

        Self {
            normalized_text: normalized,
            experiences,
            education,
            total_years,
            now_year,
        }
    }

    fn extract_experiences(normalized: &str, now_year: i32) -> Vec<WorkExperience> {
        let range_re =
            Regex::new(r"\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now)\b")
                .unwrap();

        let mut experiences: Vec<WorkExperience> = Vec::new();
        for line in normalized.lines() {
            if let Some(caps) = range_re.captures(line) {
                let start_year: i32 = caps[1].parse().unwrap_or(now_year);
                let end_raw = &caps[2];
                let ongoing = end_raw.parse::<i32>().is_err();
                let end_year = end_raw.parse::<i32>().unwrap_or(now_year);

                let whole = caps.get(0).unwrap();
                let heading = line[..whole.start()]
                    .trim_end_matches(|c: char| {
                        c.is_whitespace() || matches!(c, ',' | '(' | '|' | ':' | '–' | '-')
                    })
                    .trim();
                // "Title, Company 2020 - 2023": keep the title, drop the
                // company so fuzzy title comparison is not diluted.
                let title = heading
                    .split(&[',', '|', '@'][..])
                    .next()
                    .unwrap_or(heading)
                    .trim()
                    .to_string();

                experiences.push(WorkExperience {
                    title,
                    start_year,
                    end_year,
                    ongoing,
                    description: String::new(),
                });
            } else if let Some(current) = experiences.last_mut() {
                if !line.trim().is_empty() {
                    if !current.description.is_empty() {
                        current.description.push(' ');
                    }
                    current.description.push_str(line.trim());
                }
            }
        }

        experiences
    }

    fn extract_education(normalized: &str) -> Vec<Education> {
        let mut education = Vec::new();
        for keyword in DEGREE_KEYWORDS {
            if normalized.contains(keyword) {
                education.push(Education {
                    credential: keyword.to_string(),
                });
            }
        }
        education
    }

    /// Employment gaps in years between consecutive roles, most recent pair
    /// first.
    pub fn employment_gaps(&self) -> Vec<(i32, i32, i32)> {
        let mut gaps = Vec::new();
        for pair in self.experiences.windows(2) {
            let gap = pair[0].start_year - pair[1].end_year;
            if gap > 0 {
                gaps.push((gap, pair[1].end_year, pair[0].start_year));
            }
        }
        gaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Smith\n\
        Senior Data Engineer\n\n\
        EXPERIENCE\n\
        Senior Data Engineer, Acme Corp 2021 - Present\n\
        Built Spark pipelines on AWS with Airflow orchestration.\n\
        Data Engineer, Initech 2017 - 2021\n\
        Designed PostgreSQL schemas and Kafka ingestion.\n\
        Analyst, Foo Inc 2014 - 2016\n\
        SQL reporting.\n\n\
        EDUCATION\n\
        Bachelor of Science in Computer Science";

    #[test]
    fn test_extracts_experiences_with_dates() {
        let profile = ResumeProfile::parse(RESUME);
        assert_eq!(profile.experiences.len(), 3);

        let latest = &profile.experiences[0];
        assert!(latest.title.contains("senior data engineer"));
        assert_eq!(latest.start_year, 2021);
        assert!(latest.ongoing);
        assert!(latest.description.contains("spark"));
    }

    #[test]
    fn test_total_years_sums_ranges() {
        let profile = ResumeProfile::parse(RESUME);
        // (now-2021) + 4 + 2; at least the closed ranges are counted
        assert!(profile.total_years >= 6.0);
    }

    #[test]
    fn test_extracts_education() {
        let profile = ResumeProfile::parse(RESUME);
        assert!(profile
            .education
            .iter()
            .any(|e| e.credential == "bachelor"));
    }

    #[test]
    fn test_employment_gap_detection() {
        let profile = ResumeProfile::parse(RESUME);
        // 2016 -> 2017 is a 1-year seam between Foo Inc and Initech
        let gaps = profile.employment_gaps();
        assert!(gaps.iter().any(|(gap, from, to)| *gap == 1 && *from == 2016 && *to == 2017));
    }

    #[test]
    fn test_no_experience_section() {
        let profile = ResumeProfile::parse("Name: John\nEducation: BS in CS");
        assert!(profile.experiences.is_empty());
        assert_eq!(profile.total_years, 0.0);
    }
}
