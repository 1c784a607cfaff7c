//! Rule-based red flag detection
//!
//! Each rule is evaluated independently and appends one free-text warning.
//! Strict mode lowers the thresholds; it can only add flags, never remove
//! them, so enabling it never raises the overall score.

use crate::config::ScoringConfig;
use crate::processing::matcher::KeywordMatch;
use crate::processing::requirements::JdProfile;
use crate::processing::resume::ResumeProfile;

const WEAK_CLAIM_PHRASES: &[&str] = &["familiar with", "basic knowledge", "some experience with"];

pub struct RedFlagDetector<'a> {
    config: &'a ScoringConfig,
    strict: bool,
}

impl<'a> RedFlagDetector<'a> {
    pub fn new(config: &'a ScoringConfig, strict: bool) -> Self {
        Self { config, strict }
    }

    pub fn detect(
        &self,
        resume: &ResumeProfile,
        jd: &JdProfile,
        must_have_matches: &[KeywordMatch],
    ) -> Vec<String> {
        let mut flags = Vec::new();

        self.check_missing_must_haves(must_have_matches, &mut flags);
        self.check_employment_gaps(resume, &mut flags);
        self.check_job_hopping(resume, &mut flags);
        self.check_insufficient_years(resume, jd, &mut flags);
        self.check_weak_claims(resume, must_have_matches, &mut flags);

        flags
    }

    fn check_missing_must_haves(&self, matches: &[KeywordMatch], flags: &mut Vec<String>) {
        let missing: Vec<&str> = matches
            .iter()
            .filter(|m| !m.matched)
            .map(|m| m.term.as_str())
            .collect();
        if !missing.is_empty() {
            let preview = missing
                .iter()
                .take(3)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            flags.push(format!(
                "Missing {} must-have keywords: {}",
                missing.len(),
                preview
            ));
        }
    }

    fn check_employment_gaps(&self, resume: &ResumeProfile, flags: &mut Vec<String>) {
        let threshold = self.config.employment_gap_for(self.strict);
        for (gap, from, to) in resume.employment_gaps() {
            if gap > threshold {
                flags.push(format!("Employment gap: {} years ({}-{})", gap, from, to));
            }
        }
    }

    fn check_job_hopping(&self, resume: &ResumeProfile, flags: &mut Vec<String>) {
        let threshold = self.config.short_tenure_for(self.strict);
        let short_roles = resume
            .experiences
            .iter()
            .filter(|e| !e.ongoing && e.years() < threshold)
            .count();
        if short_roles >= 2 {
            flags.push(format!(
                "Potential job hopping: {} positions under {:.1} years",
                short_roles, threshold
            ));
        }
    }

    fn check_insufficient_years(
        &self,
        resume: &ResumeProfile,
        jd: &JdProfile,
        flags: &mut Vec<String>,
    ) {
        if let Some(required) = jd.required_years {
            if resume.total_years < required as f64 {
                flags.push(format!(
                    "Total experience {:.1} years is below the stated minimum of {} years",
                    resume.total_years, required
                ));
            }
        }
    }

    fn check_weak_claims(
        &self,
        resume: &ResumeProfile,
        must_have_matches: &[KeywordMatch],
        flags: &mut Vec<String>,
    ) {
        if must_have_matches.iter().all(|m| !m.matched) {
            return;
        }
        for phrase in WEAK_CLAIM_PHRASES {
            if resume.normalized_text.contains(phrase) {
                flags.push(format!(
                    "Weak claim detected: '{}' used near required skills",
                    phrase
                ));
                break;
            }
        }
    }
}
