//! Report rendering
//!
//! One stored analysis, three renderings: canonical JSON, human-readable
//! Markdown, and a printable PDF. All three are views over the same
//! `AnalysisRecord`; none of them re-run any scoring.

pub mod markdown;
pub mod pdf;

use crate::error::Result;
use crate::store::AnalysisRecord;
use serde_json::json;

/// Canonical JSON rendering: the stored result wrapped with its identifier
/// and creation time.
pub fn render_json(record: &AnalysisRecord) -> Result<String> {
    let value = json!({
        "analysis_id": record.id,
        "created_at": record.created_at,
        "result": record.result,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scoring::engine::{AnalysisSettings, ScoringEngine};
    use crate::store::AnalysisStore;
    use std::sync::Arc;

    pub(crate) fn sample_record() -> Arc<AnalysisRecord> {
        let engine = ScoringEngine::new(Config::default());
        let result = engine
            .analyze(
                "Senior Data Engineer\n\nSenior Data Engineer, Acme 2021 - Present\n\
                 Built Spark pipelines in Python. Strong SQL.\n\n\
                 Education\nBachelor of Science",
                "Senior Data Engineer\nRequirements:\n- Must have Python and SQL\n\
                 - 5+ years experience required",
                AnalysisSettings::default(),
            )
            .unwrap();
        let store = AnalysisStore::new(&Config::default().store);
        store.put(result)
    }

    #[test]
    fn test_json_contains_id_and_scores() {
        let record = sample_record();
        let rendered = render_json(&record).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["analysis_id"], record.id.as_str());
        assert!(value["result"]["overall_score"].is_number());
        assert_eq!(
            value["result"]["categories"]
                .as_object()
                .map(|o| o.len()),
            Some(8)
        );
    }
}
