//! Actionable output derived from the scored categories
//!
//! Pure derivation from evidence the pipeline already computed; nothing in
//! here re-runs matching. Produces the gaps, strengths, and keyword
//! suggestions attached to every report, plus optional resume tailoring
//! suggestions when the caller opts in.

use crate::processing::matcher::KeywordMatch;
use crate::processing::requirements::{JdProfile, Priority};
use crate::scoring::category::{CategoryKey, CategoryResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actions {
    pub gaps: Vec<String>,
    pub good_fit_summary: Vec<String>,
    pub ats_keywords_to_add: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub resume_tailoring_suggestions: Vec<String>,
}

const GAP_THRESHOLD: f64 = 60.0;
const STRENGTH_THRESHOLD: f64 = 75.0;
const SUMMARY_TERM_LIMIT: usize = 5;

pub struct ActionBuilder;

impl ActionBuilder {
    pub fn build(
        categories: &BTreeMap<CategoryKey, CategoryResult>,
        jd: &JdProfile,
        matches: &[KeywordMatch],
        red_flags: &[String],
        include_tailoring: bool,
    ) -> Actions {
        let gaps = Self::gaps(jd, matches, red_flags);
        let good_fit_summary = Self::good_fit_summary(categories, jd, matches);
        let ats_keywords_to_add = Self::missing_keywords(jd, matches);
        let resume_tailoring_suggestions = if include_tailoring {
            Self::tailoring_suggestions(jd, matches, categories)
        } else {
            Vec::new()
        };

        Actions {
            gaps,
            good_fit_summary,
            ats_keywords_to_add,
            resume_tailoring_suggestions,
        }
    }

    /// Unmatched must-haves phrased as action items, followed by the
    /// triggered red flags.
    fn gaps(jd: &JdProfile, matches: &[KeywordMatch], red_flags: &[String]) -> Vec<String> {
        let mut gaps: Vec<String> = jd
            .requirements
            .iter()
            .zip(matches.iter())
            .filter(|(req, m)| req.priority == Priority::MustHave && !m.matched)
            .map(|(_, m)| format!("Demonstrate required experience with '{}'", m.term))
            .collect();
        gaps.extend(red_flags.iter().map(|f| format!("Address: {}", f)));
        gaps
    }

    /// One short statement per strength: top matched must-have terms first,
    /// then every category at or above the strong threshold.
    fn good_fit_summary(
        categories: &BTreeMap<CategoryKey, CategoryResult>,
        jd: &JdProfile,
        matches: &[KeywordMatch],
    ) -> Vec<String> {
        let matched_musts: Vec<&str> = jd
            .requirements
            .iter()
            .zip(matches.iter())
            .filter(|(req, m)| req.priority == Priority::MustHave && m.matched)
            .map(|(_, m)| m.term.as_str())
            .take(SUMMARY_TERM_LIMIT)
            .collect();

        let mut statements = Vec::new();
        if !matched_musts.is_empty() {
            statements.push(format!(
                "Covers required skills: {}",
                matched_musts.join(", ")
            ));
        }
        for result in categories.values() {
            if result.score >= STRENGTH_THRESHOLD {
                statements.push(format!(
                    "Strong in {} ({:.1})",
                    result.category.display_name(),
                    result.score
                ));
            }
        }
        if statements.is_empty() {
            statements.push("No clear strengths against this job description.".to_string());
        }
        statements
    }

    /// Unmatched must-haves first, then unmatched nice-to-haves, each tier
    /// in JD order, deduplicated across tiers.
    fn missing_keywords(jd: &JdProfile, matches: &[KeywordMatch]) -> Vec<String> {
        let mut missing: Vec<(u8, String)> = jd
            .requirements
            .iter()
            .zip(matches.iter())
            .filter(|(_, m)| !m.matched)
            .map(|(req, m)| {
                let rank = match req.priority {
                    Priority::MustHave => 0,
                    Priority::NiceToHave => 1,
                };
                (rank, m.term.clone())
            })
            .collect();
        missing.sort_by_key(|(rank, _)| *rank);

        let mut seen = HashSet::new();
        missing
            .into_iter()
            .filter(|(_, term)| seen.insert(term.clone()))
            .map(|(_, term)| term)
            .collect()
    }

    fn tailoring_suggestions(
        jd: &JdProfile,
        matches: &[KeywordMatch],
        categories: &BTreeMap<CategoryKey, CategoryResult>,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        for (req, m) in jd.requirements.iter().zip(matches.iter()) {
            if !m.matched && req.priority == Priority::MustHave {
                suggestions.push(format!(
                    "Add a bullet demonstrating hands-on work with '{}'; it is listed as required",
                    m.term
                ));
            }
        }

        if let Some(role) = categories.get(&CategoryKey::RoleMatch) {
            if role.score < GAP_THRESHOLD && !jd.target_title.is_empty() {
                suggestions.push(format!(
                    "Align your most recent job title wording with '{}' where accurate",
                    jd.target_title
                ));
            }
        }
        if let Some(recency) = categories.get(&CategoryKey::RecencyMatch) {
            if recency.score < GAP_THRESHOLD {
                suggestions.push(
                    "Surface required skills in your most recent role, not only in older positions"
                        .to_string(),
                );
            }
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::requirements::RequirementKeyword;

    fn categories_with(score_overrides: &[(CategoryKey, f64)]) -> BTreeMap<CategoryKey, CategoryResult> {
        let mut map = BTreeMap::new();
        for key in CategoryKey::ALL {
            map.insert(key, CategoryResult::new(key, 70.0));
        }
        for (key, score) in score_overrides {
            map.insert(*key, CategoryResult::new(*key, *score));
        }
        map
    }

    fn jd_with(reqs: &[(&str, Priority)]) -> JdProfile {
        JdProfile {
            normalized_text: String::new(),
            target_title: "data engineer".to_string(),
            requirements: reqs
                .iter()
                .map(|(term, priority)| RequirementKeyword {
                    term: term.to_string(),
                    category: CategoryKey::KeywordSkills,
                    priority: *priority,
                })
                .collect(),
            required_years: None,
            required_degrees: Vec::new(),
            role_keywords: Vec::new(),
        }
    }

    fn matches_for(jd: &JdProfile, matched: &[bool]) -> Vec<KeywordMatch> {
        jd.requirements
            .iter()
            .zip(matched.iter())
            .map(|(req, m)| KeywordMatch {
                term: req.term.clone(),
                matched: *m,
                evidence: String::new(),
                category: req.category,
            })
            .collect()
    }

    #[test]
    fn test_gaps_combine_missing_musts_and_red_flags() {
        let jd = jd_with(&[("python", Priority::MustHave), ("docker", Priority::NiceToHave)]);
        let matches = matches_for(&jd, &[false, false]);
        let red_flags = vec!["Employment gap: 3 years (2015-2018)".to_string()];

        let actions = ActionBuilder::build(&categories_with(&[]), &jd, &matches, &red_flags, false);
        assert_eq!(actions.gaps.len(), 2);
        assert!(actions.gaps[0].contains("python"));
        assert!(actions.gaps[1].contains("Employment gap"));
        // nice-to-have misses are not gaps
        assert!(!actions.gaps.iter().any(|g| g.contains("docker")));
    }

    #[test]
    fn test_missing_keywords_must_haves_first_and_deduplicated() {
        let jd = jd_with(&[
            ("kubernetes", Priority::NiceToHave),
            ("python", Priority::MustHave),
            ("spark", Priority::MustHave),
            ("python", Priority::NiceToHave),
        ]);
        let matches = matches_for(&jd, &[false, false, true, false]);
        let actions = ActionBuilder::build(&categories_with(&[]), &jd, &matches, &[], false);
        assert_eq!(actions.ats_keywords_to_add, vec!["python", "kubernetes"]);
    }

    #[test]
    fn test_tailoring_suggestions_gated_by_toggle() {
        let jd = jd_with(&[("python", Priority::MustHave)]);
        let matches = matches_for(&jd, &[false]);
        let categories = categories_with(&[]);

        let without = ActionBuilder::build(&categories, &jd, &matches, &[], false);
        assert!(without.resume_tailoring_suggestions.is_empty());

        let with = ActionBuilder::build(&categories, &jd, &matches, &[], true);
        assert!(!with.resume_tailoring_suggestions.is_empty());
        assert!(with.resume_tailoring_suggestions[0].contains("python"));
    }

    #[test]
    fn test_good_fit_summary_names_matched_musts_and_strengths() {
        let jd = jd_with(&[("python", Priority::MustHave)]);
        let matches = matches_for(&jd, &[true]);
        let categories = categories_with(&[(CategoryKey::KeywordSkills, 95.0)]);

        let actions = ActionBuilder::build(&categories, &jd, &matches, &[], false);
        assert_eq!(actions.good_fit_summary.len(), 2);
        assert!(actions.good_fit_summary[0].contains("python"));
        assert!(actions.good_fit_summary[1].contains("Keyword"));
    }

    #[test]
    fn test_good_fit_summary_serializes_as_array() {
        let jd = jd_with(&[("python", Priority::MustHave)]);
        let matches = matches_for(&jd, &[true]);
        let categories = categories_with(&[(CategoryKey::KeywordSkills, 95.0)]);

        let actions = ActionBuilder::build(&categories, &jd, &matches, &[], false);
        let value = serde_json::to_value(&actions).unwrap();
        assert!(value["good_fit_summary"].is_array());
        assert!(value["good_fit_summary"][0].as_str().unwrap().contains("python"));
    }

    #[test]
    fn test_no_strengths_yields_stock_summary() {
        let jd = jd_with(&[("python", Priority::MustHave)]);
        let matches = matches_for(&jd, &[false]);
        let categories = categories_with(&[
            (CategoryKey::KeywordSkills, 10.0),
            (CategoryKey::ExperienceRelevance, 10.0),
            (CategoryKey::RoleMatch, 10.0),
            (CategoryKey::SeniorityMatch, 10.0),
            (CategoryKey::EducationMatch, 10.0),
            (CategoryKey::ToolingStackMatch, 10.0),
            (CategoryKey::RecencyMatch, 10.0),
            (CategoryKey::RedFlags, 10.0),
        ]);
        let actions = ActionBuilder::build(&categories, &jd, &matches, &[], false);
        assert_eq!(actions.good_fit_summary.len(), 1);
        assert!(actions.good_fit_summary[0].contains("No clear strengths"));
    }
}
