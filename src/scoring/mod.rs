//! Scoring pipeline: category scorers, red flag detection, aggregation,
//! and recommendation generation.

pub mod category;
pub mod engine;
pub mod recommendations;
pub mod red_flags;
pub mod scorers;

pub use category::{CategoryKey, CategoryResult, MatchLabel, WeightConfig};
pub use engine::{AnalysisResult, AnalysisSettings, ScoringEngine};
