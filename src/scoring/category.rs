//! Scoring categories, per-category results, and the weight table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The eight scoring dimensions. This set is closed: the aggregator requires
/// a score for every variant, and the weight table carries one field each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    KeywordSkills,
    ExperienceRelevance,
    RoleMatch,
    SeniorityMatch,
    EducationMatch,
    ToolingStackMatch,
    RecencyMatch,
    RedFlags,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 8] = [
        CategoryKey::KeywordSkills,
        CategoryKey::ExperienceRelevance,
        CategoryKey::RoleMatch,
        CategoryKey::SeniorityMatch,
        CategoryKey::EducationMatch,
        CategoryKey::ToolingStackMatch,
        CategoryKey::RecencyMatch,
        CategoryKey::RedFlags,
    ];

    /// Section heading used in Markdown and PDF reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryKey::KeywordSkills => "A) Keyword & Skills Match",
            CategoryKey::ExperienceRelevance => "B) Experience Relevance Match",
            CategoryKey::RoleMatch => "C) Role/Title Match",
            CategoryKey::SeniorityMatch => "D) Seniority/Years Match",
            CategoryKey::EducationMatch => "E) Education/Certs Match",
            CategoryKey::ToolingStackMatch => "F) Tooling/Stack Match",
            CategoryKey::RecencyMatch => "G) Recency Match",
            CategoryKey::RedFlags => "H) Red Flag Detection",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::KeywordSkills => "keyword_skills",
            CategoryKey::ExperienceRelevance => "experience_relevance",
            CategoryKey::RoleMatch => "role_match",
            CategoryKey::SeniorityMatch => "seniority_match",
            CategoryKey::EducationMatch => "education_match",
            CategoryKey::ToolingStackMatch => "tooling_stack_match",
            CategoryKey::RecencyMatch => "recency_match",
            CategoryKey::RedFlags => "red_flags",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score for a single category with diagnostic details and evidence snippets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: CategoryKey,
    pub score: f64,
    pub details: BTreeMap<String, serde_json::Value>,
    pub evidence: Vec<String>,
}

impl CategoryResult {
    pub fn new(category: CategoryKey, score: f64) -> Self {
        Self {
            category,
            score: score.clamp(0.0, 100.0),
            details: BTreeMap::new(),
            evidence: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<String>, limit: usize) -> Self {
        self.evidence = evidence;
        self.evidence.truncate(limit);
        self
    }
}

/// Per-category aggregation weights. A fixed-size record rather than a map,
/// so a missing category cannot silently zero the aggregate: absent fields
/// deserialize to the category's default weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub keyword_skills: f64,
    pub experience_relevance: f64,
    pub role_match: f64,
    pub seniority_match: f64,
    pub education_match: f64,
    pub tooling_stack_match: f64,
    pub recency_match: f64,
    pub red_flags: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            keyword_skills: 0.30,
            experience_relevance: 0.20,
            role_match: 0.10,
            seniority_match: 0.10,
            education_match: 0.10,
            tooling_stack_match: 0.10,
            recency_match: 0.05,
            red_flags: 0.05,
        }
    }
}

impl WeightConfig {
    pub fn get(&self, key: CategoryKey) -> f64 {
        match key {
            CategoryKey::KeywordSkills => self.keyword_skills,
            CategoryKey::ExperienceRelevance => self.experience_relevance,
            CategoryKey::RoleMatch => self.role_match,
            CategoryKey::SeniorityMatch => self.seniority_match,
            CategoryKey::EducationMatch => self.education_match,
            CategoryKey::ToolingStackMatch => self.tooling_stack_match,
            CategoryKey::RecencyMatch => self.recency_match,
            CategoryKey::RedFlags => self.red_flags,
        }
    }

    pub fn sum(&self) -> f64 {
        CategoryKey::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Rescales the weights to sum to 1.0. Negative entries are clamped to
    /// zero first; a configuration that sums to zero falls back to the
    /// defaults. Never fails.
    pub fn normalized(&self) -> WeightConfig {
        let clamped = WeightConfig {
            keyword_skills: self.keyword_skills.max(0.0),
            experience_relevance: self.experience_relevance.max(0.0),
            role_match: self.role_match.max(0.0),
            seniority_match: self.seniority_match.max(0.0),
            education_match: self.education_match.max(0.0),
            tooling_stack_match: self.tooling_stack_match.max(0.0),
            recency_match: self.recency_match.max(0.0),
            red_flags: self.red_flags.max(0.0),
        };

        let total = clamped.sum();
        if total <= f64::EPSILON {
            return WeightConfig::default();
        }

        WeightConfig {
            keyword_skills: clamped.keyword_skills / total,
            experience_relevance: clamped.experience_relevance / total,
            role_match: clamped.role_match / total,
            seniority_match: clamped.seniority_match / total,
            education_match: clamped.education_match / total,
            tooling_stack_match: clamped.tooling_stack_match / total,
            recency_match: clamped.recency_match / total,
            red_flags: clamped.red_flags / total,
        }
    }
}

/// Three-tier qualitative classification of the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    #[serde(rename = "STRONG_MATCH")]
    StrongMatch,
    #[serde(rename = "MEDIUM_MATCH")]
    MediumMatch,
    #[serde(rename = "WEAK_MATCH")]
    WeakMatch,
}

impl MatchLabel {
    /// Boundaries are inclusive-lower and user-visible, so they must be exact:
    /// `>= 75` strong, `>= 50` medium, otherwise weak.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            MatchLabel::StrongMatch
        } else if score >= 50.0 {
            MatchLabel::MediumMatch
        } else {
            MatchLabel::WeakMatch
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MatchLabel::StrongMatch => "STRONG MATCH",
            MatchLabel::MediumMatch => "MEDIUM MATCH",
            MatchLabel::WeakMatch => "WEAK MATCH",
        }
    }
}
