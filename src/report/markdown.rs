//! Markdown report rendering

use crate::scoring::category::{CategoryKey, CategoryResult};
use crate::store::AnalysisRecord;
use std::fmt::Write;

/// Renders the stored analysis as a Markdown document. Infallible: writing
/// into a `String` cannot fail, so the renderer returns the document
/// directly.
pub fn render(record: &AnalysisRecord) -> String {
    let result = &record.result;
    let mut out = String::new();

    let _ = writeln!(out, "# ATS Match Report\n");
    let _ = writeln!(out, "**Overall Score:** {:.1} / 100", result.overall_score);
    let _ = writeln!(out, "**Match Label:** {}\n", result.label.display_name());

    let _ = writeln!(out, "## Category Scores\n");
    let _ = writeln!(out, "| Category | Score |");
    let _ = writeln!(out, "|----------|-------|");
    for key in CategoryKey::ALL {
        if let Some(category) = result.categories.get(&key) {
            let _ = writeln!(out, "| {} | {:.1} |", key.display_name(), category.score);
        }
    }
    let _ = writeln!(out);

    render_keywords(&mut out, result.categories.get(&CategoryKey::KeywordSkills), "Keywords & Skills");
    render_keywords(
        &mut out,
        result.categories.get(&CategoryKey::ToolingStackMatch),
        "Tooling & Stack",
    );

    let _ = writeln!(out, "## Red Flags\n");
    if result.red_flags.is_empty() {
        let _ = writeln!(out, "None detected.\n");
    } else {
        for flag in &result.red_flags {
            let _ = writeln!(out, "- ⚠️ {}", flag);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Recommendations\n");
    for statement in &result.actions.good_fit_summary {
        let _ = writeln!(out, "- {}", statement);
    }
    let _ = writeln!(out);
    if !result.actions.gaps.is_empty() {
        let _ = writeln!(out, "### Gaps\n");
        for gap in &result.actions.gaps {
            let _ = writeln!(out, "- {}", gap);
        }
        let _ = writeln!(out);
    }
    if !result.actions.ats_keywords_to_add.is_empty() {
        let _ = writeln!(out, "### Keywords to Add\n");
        for keyword in &result.actions.ats_keywords_to_add {
            let _ = writeln!(out, "- {}", keyword);
        }
        let _ = writeln!(out);
    }
    if !result.actions.resume_tailoring_suggestions.is_empty() {
        let _ = writeln!(out, "### Tailoring Suggestions\n");
        for suggestion in &result.actions.resume_tailoring_suggestions {
            let _ = writeln!(out, "- {}", suggestion);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "---");
    let _ = writeln!(
        out,
        "Report {} generated {} by engine v{}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M UTC"),
        result.metadata.version
    );

    out
}

fn render_keywords(out: &mut String, category: Option<&CategoryResult>, heading: &str) {
    let Some(category) = category else { return };

    let terms = |key: &str| -> Vec<String> {
        category
            .details
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    };
    let matched = terms("keywords_matched");
    let missing = terms("keywords_missing");
    if matched.is_empty() && missing.is_empty() {
        return;
    }

    let _ = writeln!(out, "## {}\n", heading);
    for term in &matched {
        let _ = writeln!(out, "- ✓ {}", term);
    }
    for term in &missing {
        let _ = writeln!(out, "- ✗ {}", term);
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_record;

    #[test]
    fn test_markdown_has_header_and_table() {
        let record = sample_record();
        let doc = render(&record);

        assert!(doc.starts_with("# ATS Match Report"));
        assert!(doc.contains("**Overall Score:**"));
        assert!(doc.contains("| Category | Score |"));
        assert!(doc.contains("A) Keyword & Skills Match"));
    }

    #[test]
    fn test_markdown_lists_every_category() {
        let record = sample_record();
        let doc = render(&record);
        for key in CategoryKey::ALL {
            assert!(doc.contains(key.display_name()), "missing {}", key.as_str());
        }
    }

    #[test]
    fn test_markdown_score_matches_result() {
        let record = sample_record();
        let doc = render(&record);
        assert!(doc.contains(&format!("{:.1} / 100", record.result.overall_score)));
    }

    #[test]
    fn test_markdown_footer_names_record() {
        let record = sample_record();
        let doc = render(&record);
        assert!(doc.contains(&record.id));
    }
}
