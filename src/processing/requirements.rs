//! Requirement extraction from job-description text
//!
//! Line-oriented: section headings set the active priority, inline qualifying
//! language overrides it per line. Terms come from a static tech dictionary,
//! acronym capture, and phrase rules for years, degrees, and titles.

use crate::processing::text;
use crate::scoring::category::CategoryKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    MustHave,
    NiceToHave,
}

/// A single requirement extracted from the JD. Derived once per analysis,
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementKeyword {
    pub term: String,
    pub category: CategoryKey,
    pub priority: Priority,
}

/// Structured view of a job description used by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdProfile {
    pub normalized_text: String,
    pub target_title: String,
    pub requirements: Vec<RequirementKeyword>,
    pub required_years: Option<u32>,
    pub required_degrees: Vec<String>,
    pub role_keywords: Vec<String>,
}

/// Tech dictionary, tagged with the category each term scores under.
/// Languages and ML concepts land in keyword_skills; infrastructure,
/// databases, and tooling land in tooling_stack_match.
const TECH_TERMS: &[(&str, CategoryKey)] = &[
    // Languages
    ("python", CategoryKey::KeywordSkills),
    ("java", CategoryKey::KeywordSkills),
    ("javascript", CategoryKey::KeywordSkills),
    ("typescript", CategoryKey::KeywordSkills),
    ("sql", CategoryKey::KeywordSkills),
    ("scala", CategoryKey::KeywordSkills),
    ("rust", CategoryKey::KeywordSkills),
    ("go", CategoryKey::KeywordSkills),
    ("c++", CategoryKey::KeywordSkills),
    ("c#", CategoryKey::KeywordSkills),
    ("kotlin", CategoryKey::KeywordSkills),
    ("ruby", CategoryKey::KeywordSkills),
    // ML / data science
    ("machine learning", CategoryKey::KeywordSkills),
    ("deep learning", CategoryKey::KeywordSkills),
    ("nlp", CategoryKey::KeywordSkills),
    ("tensorflow", CategoryKey::KeywordSkills),
    ("pytorch", CategoryKey::KeywordSkills),
    ("scikit-learn", CategoryKey::KeywordSkills),
    ("pandas", CategoryKey::KeywordSkills),
    // Databases
    ("postgresql", CategoryKey::ToolingStackMatch),
    ("mysql", CategoryKey::ToolingStackMatch),
    ("mongodb", CategoryKey::ToolingStackMatch),
    ("cassandra", CategoryKey::ToolingStackMatch),
    ("dynamodb", CategoryKey::ToolingStackMatch),
    ("redis", CategoryKey::ToolingStackMatch),
    ("elasticsearch", CategoryKey::ToolingStackMatch),
    ("oracle", CategoryKey::ToolingStackMatch),
    // Cloud / infrastructure
    ("aws", CategoryKey::ToolingStackMatch),
    ("azure", CategoryKey::ToolingStackMatch),
    ("gcp", CategoryKey::ToolingStackMatch),
    ("terraform", CategoryKey::ToolingStackMatch),
    ("docker", CategoryKey::ToolingStackMatch),
    ("kubernetes", CategoryKey::ToolingStackMatch),
    // Big data / pipelines
    ("spark", CategoryKey::ToolingStackMatch),
    ("hadoop", CategoryKey::ToolingStackMatch),
    ("hive", CategoryKey::ToolingStackMatch),
    ("kafka", CategoryKey::ToolingStackMatch),
    ("flink", CategoryKey::ToolingStackMatch),
    ("airflow", CategoryKey::ToolingStackMatch),
    ("dbt", CategoryKey::ToolingStackMatch),
    // Dev tooling
    ("git", CategoryKey::ToolingStackMatch),
    ("jenkins", CategoryKey::ToolingStackMatch),
    ("gitlab", CategoryKey::ToolingStackMatch),
    ("github", CategoryKey::ToolingStackMatch),
    ("jira", CategoryKey::ToolingStackMatch),
];

const MUST_CUES: &[&str] = &[
    "must have",
    "required",
    "requirement",
    "minimum",
    "need ",
    "expertise in",
    "essential",
];

const NICE_CUES: &[&str] = &[
    "preferred",
    "plus",
    "bonus",
    "nice to have",
    "additional",
    "beneficial",
    "desirable",
];

const MUST_HEADINGS: &[&str] = &["requirements", "qualifications", "must have", "what you'll need"];
const NICE_HEADINGS: &[&str] = &["preferred", "nice to have", "bonus", "good to have"];

const DEGREE_TERMS: &[&str] = &["bachelor", "master", "phd", "degree", "certificate", "certification"];

const ROLE_TERMS: &[&str] = &[
    "engineer",
    "developer",
    "analyst",
    "manager",
    "architect",
    "scientist",
    "specialist",
    "lead",
    "senior",
];

pub struct RequirementExtractor;

impl RequirementExtractor {
    /// Parses the job description into a structured profile. A JD with no
    /// extractable structure yields an empty requirement list, not an error;
    /// the rest of the pipeline still runs.
    pub fn extract(raw_text: &str) -> JdProfile {
        let normalized = text::normalize(raw_text);
        let target_title = normalized
            .lines()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .to_string();

        let requirements = Self::extract_requirements(&normalized, raw_text);
        let required_years = Self::extract_required_years(&normalized);
        let required_degrees = Self::extract_required_degrees(&normalized);
        let role_keywords = ROLE_TERMS
            .iter()
            .filter(|r| normalized.contains(*r))
            .map(|r| r.to_string())
            .collect();

        JdProfile {
            normalized_text: normalized,
            target_title,
            requirements,
            required_years,
            required_degrees,
            role_keywords,
        }
    }

    fn extract_requirements(normalized: &str, raw_text: &str) -> Vec<RequirementKeyword> {
        let acronym_re = Regex::new(r"\b[A-Z]{2,6}\b").unwrap();

        let mut seen: HashSet<(String, CategoryKey)> = HashSet::new();
        let mut requirements = Vec::new();
        let mut push = |term: String, category: CategoryKey, priority: Priority,
                        out: &mut Vec<RequirementKeyword>| {
            if seen.insert((term.clone(), category)) {
                out.push(RequirementKeyword {
                    term,
                    category,
                    priority,
                });
            }
        };

        // Section headings carry priority downward; inline cues win per line.
        let mut section_priority: Option<Priority> = None;
        let raw_lines: Vec<&str> = raw_text.lines().collect();

        for (idx, line) in normalized.lines().enumerate() {
            if Self::is_heading(line, MUST_HEADINGS) {
                section_priority = Some(Priority::MustHave);
                continue;
            }
            if Self::is_heading(line, NICE_HEADINGS) {
                section_priority = Some(Priority::NiceToHave);
                continue;
            }

            let inline = if NICE_CUES.iter().any(|c| line.contains(c)) {
                Some(Priority::NiceToHave)
            } else if MUST_CUES.iter().any(|c| line.contains(c)) {
                Some(Priority::MustHave)
            } else {
                None
            };

            let Some(priority) = inline.or(section_priority) else {
                continue;
            };

            for (term, category) in TECH_TERMS {
                if Self::contains_word(line, term) {
                    push(term.to_string(), *category, priority, &mut requirements);
                }
            }

            // Uppercase acronyms from the raw line (normalization lowercases)
            if let Some(raw_line) = raw_lines.get(idx) {
                for m in acronym_re.find_iter(raw_line) {
                    let term = m.as_str().to_lowercase();
                    let known = TECH_TERMS.iter().any(|(t, _)| *t == term);
                    if !known {
                        push(term, CategoryKey::KeywordSkills, priority, &mut requirements);
                    }
                }
            }

            if let Some(years) = Self::extract_required_years(line) {
                push(
                    format!("{}+ years experience", years),
                    CategoryKey::SeniorityMatch,
                    priority,
                    &mut requirements,
                );
            }

            for degree in DEGREE_TERMS {
                if line.contains(degree) {
                    push(
                        degree.to_string(),
                        CategoryKey::EducationMatch,
                        priority,
                        &mut requirements,
                    );
                }
            }

            for role in ROLE_TERMS {
                if Self::contains_word(line, role) {
                    push(
                        role.to_string(),
                        CategoryKey::RoleMatch,
                        priority,
                        &mut requirements,
                    );
                }
            }
        }

        requirements
    }

    fn is_heading(line: &str, headings: &[&str]) -> bool {
        let trimmed = line.trim().trim_end_matches(':');
        // Short lines only; "5 years required" is a requirement, not a heading
        trimmed.split_whitespace().count() <= 4
            && headings.iter().any(|h| trimmed.starts_with(h))
    }

    /// Word-boundary containment over normalized text. Handles terms with
    /// non-alphanumeric characters (`c++`, `c#`, `scikit-learn`) by checking
    /// the surrounding characters manually instead of regex `\b`.
    pub fn contains_word(haystack: &str, term: &str) -> bool {
        let mut search_from = 0;
        while let Some(rel) = haystack[search_from..].find(term) {
            let start = search_from + rel;
            let end = start + term.len();
            let before_ok = start == 0
                || !haystack[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric());
            let after_ok = end == haystack.len()
                || !haystack[end..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric());
            if before_ok && after_ok {
                return true;
            }
            search_from = end;
        }
        false
    }

    /// Parses "3+ years", "5 years", "3-5 years" phrasing. Ranges yield the
    /// lower bound.
    pub fn extract_required_years(normalized: &str) -> Option<u32> {
        let re = Regex::new(r"(\d+)(?:\s*-\s*\d+)?\s*\+?\s*years?").unwrap();
        re.captures(normalized)
            .and_then(|caps| caps[1].parse().ok())
    }

    fn extract_required_degrees(normalized: &str) -> Vec<String> {
        DEGREE_TERMS
            .iter()
            .filter(|d| normalized.contains(*d))
            .map(|d| d.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Senior Data Engineer\n\n\
        Requirements:\n\
        - 5+ years of experience with Python and Spark required\n\
        - Must have strong SQL skills\n\
        - Bachelor degree in Computer Science\n\n\
        Nice to have:\n\
        - Kubernetes and Docker experience\n\
        - AWS certification preferred";

    #[test]
    fn test_extracts_must_and_nice_requirements() {
        let profile = RequirementExtractor::extract(JD);

        let must: Vec<_> = profile
            .requirements
            .iter()
            .filter(|r| r.priority == Priority::MustHave)
            .map(|r| r.term.as_str())
            .collect();
        let nice: Vec<_> = profile
            .requirements
            .iter()
            .filter(|r| r.priority == Priority::NiceToHave)
            .map(|r| r.term.as_str())
            .collect();

        assert!(must.contains(&"python"));
        assert!(must.contains(&"spark"));
        assert!(must.contains(&"sql"));
        assert!(nice.contains(&"kubernetes"));
        assert!(nice.contains(&"docker"));
    }

    #[test]
    fn test_category_assignment() {
        let profile = RequirementExtractor::extract(JD);

        let find = |term: &str| {
            profile
                .requirements
                .iter()
                .find(|r| r.term == term)
                .map(|r| r.category)
        };
        assert_eq!(find("python"), Some(CategoryKey::KeywordSkills));
        assert_eq!(find("spark"), Some(CategoryKey::ToolingStackMatch));
        assert_eq!(find("bachelor"), Some(CategoryKey::EducationMatch));
    }

    #[test]
    fn test_dedup_by_term_and_category() {
        let jd = "Requirements:\n- Python required\n- Python expertise essential";
        let profile = RequirementExtractor::extract(jd);
        let count = profile
            .requirements
            .iter()
            .filter(|r| r.term == "python")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_required_years() {
        assert_eq!(
            RequirementExtractor::extract_required_years("minimum 5+ years of experience"),
            Some(5)
        );
        assert_eq!(
            RequirementExtractor::extract_required_years("3-5 years of experience"),
            Some(3)
        );
        assert_eq!(RequirementExtractor::extract_required_years("no mention"), None);
    }

    #[test]
    fn test_target_title_is_first_line() {
        let profile = RequirementExtractor::extract(JD);
        assert_eq!(profile.target_title, "senior data engineer");
    }

    #[test]
    fn test_role_keywords_extracted_from_jd_text() {
        let profile = RequirementExtractor::extract(JD);
        assert!(profile.role_keywords.contains(&"engineer".to_string()));
        assert!(profile.role_keywords.contains(&"senior".to_string()));
        assert!(!profile.role_keywords.contains(&"analyst".to_string()));
    }

    #[test]
    fn test_unstructured_jd_yields_empty_list() {
        let profile = RequirementExtractor::extract("We are a fun company. Join us!");
        assert!(profile.requirements.is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        assert!(RequirementExtractor::contains_word("uses go daily", "go"));
        assert!(!RequirementExtractor::contains_word("category theory", "go"));
        assert!(RequirementExtractor::contains_word("knows c++ well", "c++"));
    }
}
