//! Static synonym dictionary for requirement terms
//!
//! Maps a term to its full lexical equivalence set (tool aliases and
//! abbreviation expansions). Loaded once; never mutated at runtime.

use std::collections::HashSet;

/// Equivalence classes. Every member of a row expands to the whole row.
const SYNONYM_SETS: &[&[&str]] = &[
    &["kubernetes", "k8s"],
    &["javascript", "js"],
    &["typescript", "ts"],
    &["postgresql", "postgres"],
    &["aws", "amazon web services"],
    &["gcp", "google cloud"],
    &["machine learning", "ml"],
    &["continuous integration", "ci/cd", "cicd"],
    &["golang", "go"],
    &["elasticsearch", "elastic search"],
    &["scikit-learn", "sklearn"],
];

pub struct SynonymExpander {
    enabled: bool,
}

impl SynonymExpander {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns the set containing `term` and its known equivalents. When
    /// disabled, the set contains only the term itself. Idempotent and
    /// order-independent: expanding any member of an equivalence class
    /// returns the same class.
    pub fn expand(&self, term: &str) -> HashSet<String> {
        let lowered = term.to_lowercase();
        let mut set = HashSet::new();
        set.insert(lowered.clone());

        if !self.enabled {
            return set;
        }

        for class in SYNONYM_SETS {
            if class.iter().any(|member| *member == lowered) {
                set.extend(class.iter().map(|m| m.to_string()));
            }
        }
        set
    }
}
