//! Keyword matching against resume text
//!
//! For each requirement keyword the matcher scans the normalized resume text
//! for the term or any of its synonyms, enforcing word boundaries, and keeps
//! the first occurrence in document order as evidence. Matching is a pure
//! function of (resume text, keyword, synonym setting).

use crate::error::{AtsAnalyzerError, Result};
use crate::processing::requirements::RequirementKeyword;
use crate::processing::synonyms::SynonymExpander;
use crate::processing::text;
use crate::scoring::category::CategoryKey;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

/// Match outcome for one requirement keyword. `evidence` is empty when
/// unmatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub term: String,
    pub matched: bool,
    pub evidence: String,
    pub category: CategoryKey,
}

pub struct KeywordMatcher<'a> {
    expander: &'a SynonymExpander,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(expander: &'a SynonymExpander) -> Self {
        Self { expander }
    }

    /// Matches every requirement against the resume, preserving requirement
    /// order.
    pub fn match_all(
        &self,
        resume_text: &str,
        requirements: &[RequirementKeyword],
    ) -> Result<Vec<KeywordMatch>> {
        let normalized = text::normalize_flat(resume_text);
        requirements
            .iter()
            .map(|req| self.match_one(&normalized, req))
            .collect()
    }

    fn match_one(&self, normalized_resume: &str, req: &RequirementKeyword) -> Result<KeywordMatch> {
        let mut candidates: Vec<String> = self.expander.expand(&req.term).into_iter().collect();
        // Deterministic automaton regardless of hash order
        candidates.sort();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&candidates)
            .map_err(|e| {
                AtsAnalyzerError::Internal(format!("Failed to build keyword automaton: {}", e))
            })?;

        // First word-boundary hit in document order wins
        for hit in automaton.find_iter(normalized_resume) {
            if !Self::on_word_boundary(normalized_resume, hit.start(), hit.end()) {
                continue;
            }
            let found = &normalized_resume[hit.start()..hit.end()];
            return Ok(KeywordMatch {
                term: req.term.clone(),
                matched: true,
                evidence: text::find_snippet(normalized_resume, found),
                category: req.category,
            });
        }

        Ok(KeywordMatch {
            term: req.term.clone(),
            matched: false,
            evidence: String::new(),
            category: req.category,
        })
    }

    fn on_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
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
        before_ok && after_ok
    }
}
