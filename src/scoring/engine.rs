//! Analysis pipeline
//!
//! Orchestrates extraction, matching, red flag detection, per-category
//! scoring, and aggregation into a single deterministic result.

use crate::config::Config;
use crate::error::{AtsAnalyzerError, Result};
use crate::processing::matcher::{KeywordMatch, KeywordMatcher};
use crate::processing::requirements::{Priority, RequirementExtractor};
use crate::processing::resume::ResumeProfile;
use crate::processing::synonyms::SynonymExpander;
use crate::scoring::category::{CategoryKey, CategoryResult, MatchLabel, WeightConfig};
use crate::scoring::recommendations::{ActionBuilder, Actions};
use crate::scoring::red_flags::RedFlagDetector;
use crate::scoring::scorers::{ScoringContext, SCORERS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// Per-request knobs. Every field has a default so callers can send a
/// partial (or empty) settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub strict_mode: bool,
    #[serde(default = "default_true")]
    pub toggle_synonyms: bool,
    pub toggle_rewrite_suggestions: bool,
    pub weights: Option<WeightConfig>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            strict_mode: false,
            toggle_synonyms: true,
            toggle_rewrite_suggestions: false,
            weights: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub settings_used: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub label: MatchLabel,
    pub categories: BTreeMap<CategoryKey, CategoryResult>,
    pub must_have: Vec<KeywordMatch>,
    pub nice_to_have: Vec<KeywordMatch>,
    pub red_flags: Vec<String>,
    pub actions: Actions,
    pub metadata: AnalysisMetadata,
}

pub struct ScoringEngine {
    config: Config,
}

impl ScoringEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the full pipeline. Pure with respect to its inputs except for
    /// the generated timestamp.
    pub fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
        settings: AnalysisSettings,
    ) -> Result<AnalysisResult> {
        if resume_text.trim().is_empty() {
            return Err(AtsAnalyzerError::Input("Resume text is empty".to_string()));
        }
        if jd_text.trim().is_empty() {
            return Err(AtsAnalyzerError::Input(
                "Job description text is empty".to_string(),
            ));
        }

        let jd = RequirementExtractor::extract(jd_text);
        let resume = ResumeProfile::parse(resume_text);

        let expander = SynonymExpander::new(settings.toggle_synonyms);
        let matcher = KeywordMatcher::new(&expander);
        let matches = matcher.match_all(resume_text, &jd.requirements)?;

        let tier = |priority: Priority| -> Vec<KeywordMatch> {
            jd.requirements
                .iter()
                .zip(matches.iter())
                .filter(|(req, _)| req.priority == priority)
                .map(|(_, m)| m.clone())
                .collect()
        };
        let must_have = tier(Priority::MustHave);
        let nice_to_have = tier(Priority::NiceToHave);

        let skill_musts: Vec<KeywordMatch> = jd
            .requirements
            .iter()
            .zip(matches.iter())
            .filter(|(req, _)| {
                req.priority == Priority::MustHave
                    && matches!(
                        req.category,
                        CategoryKey::KeywordSkills | CategoryKey::ToolingStackMatch
                    )
            })
            .map(|(_, m)| m.clone())
            .collect();
        let detector = RedFlagDetector::new(&self.config.scoring, settings.strict_mode);
        let red_flags = detector.detect(&resume, &jd, &skill_musts);

        let ctx = ScoringContext {
            resume: &resume,
            jd: &jd,
            matches: &matches,
            red_flags: &red_flags,
            config: &self.config.scoring,
            strict: settings.strict_mode,
        };

        let mut categories: BTreeMap<CategoryKey, CategoryResult> = BTreeMap::new();
        for scorer in SCORERS {
            let result = scorer.score(&ctx);
            tracing::debug!(
                category = result.category.as_str(),
                score = result.score,
                "category scored"
            );
            categories.insert(result.category, result);
        }

        let weights = settings
            .weights
            .clone()
            .unwrap_or_else(|| self.config.scoring.weights.clone())
            .normalized();
        let overall_score = Self::aggregate(&categories, &weights);
        let label = MatchLabel::from_score(overall_score);

        let actions = ActionBuilder::build(
            &categories,
            &jd,
            &matches,
            &red_flags,
            settings.toggle_rewrite_suggestions,
        );

        Ok(AnalysisResult {
            overall_score,
            label,
            categories,
            must_have,
            nice_to_have,
            red_flags,
            actions,
            metadata: AnalysisMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                settings_used: settings,
            },
        })
    }

    /// Weighted sum over the fixed category order, rounded to one decimal.
    fn aggregate(categories: &BTreeMap<CategoryKey, CategoryResult>, weights: &WeightConfig) -> f64 {
        let sum: f64 = CategoryKey::ALL
            .iter()
            .map(|key| {
                let score = categories.get(key).map(|r| r.score).unwrap_or(0.0);
                weights.get(*key) * score
            })
            .sum();
        (sum * 10.0).round() / 10.0
    }
}
