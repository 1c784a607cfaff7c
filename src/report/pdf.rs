//! PDF report rendering
//!
//! Lays out the same content as the Markdown report with a simple
//! line-based cursor on A4 pages.

use crate::error::{AtsAnalyzerError, Result};
use crate::scoring::category::CategoryKey;
use crate::store::AnalysisRecord;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new() -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new("ATS Match Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AtsAnalyzerError::Render(format!("Failed to load font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AtsAnalyzerError::Render(format!("Failed to load font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        if self.y < MARGIN + LINE_HEIGHT {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= LINE_HEIGHT * (size / BODY_SIZE);
    }

    fn heading(&mut self, text: &str) {
        self.y -= LINE_HEIGHT / 2.0;
        self.line(text, HEADING_SIZE, true);
    }

    fn body(&mut self, text: &str) {
        self.line(text, BODY_SIZE, false);
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AtsAnalyzerError::Render(format!("Failed to serialize PDF: {}", e)))
    }
}

/// Renders the stored analysis as PDF bytes.
pub fn render(record: &AnalysisRecord) -> Result<Vec<u8>> {
    let result = &record.result;
    let mut writer = PdfWriter::new()?;

    writer.line("ATS Match Report", TITLE_SIZE, true);
    writer.body(&format!(
        "Overall Score: {:.1} / 100   ({})",
        result.overall_score,
        result.label.display_name()
    ));

    writer.heading("Category Scores");
    for key in CategoryKey::ALL {
        if let Some(category) = result.categories.get(&key) {
            writer.body(&format!("{}  -  {:.1}", key.display_name(), category.score));
        }
    }

    writer.heading("Red Flags");
    if result.red_flags.is_empty() {
        writer.body("None detected.");
    } else {
        for flag in &result.red_flags {
            writer.body(&format!("! {}", flag));
        }
    }

    writer.heading("Recommendations");
    for statement in &result.actions.good_fit_summary {
        writer.body(statement);
    }
    for gap in &result.actions.gaps {
        writer.body(&format!("- {}", gap));
    }
    if !result.actions.ats_keywords_to_add.is_empty() {
        writer.body(&format!(
            "Keywords to add: {}",
            result.actions.ats_keywords_to_add.join(", ")
        ));
    }
    for suggestion in &result.actions.resume_tailoring_suggestions {
        writer.body(&format!("- {}", suggestion));
    }

    writer.heading("Metadata");
    writer.body(&format!("Report id: {}", record.id));
    writer.body(&format!(
        "Generated: {}",
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    writer.body(&format!("Engine: v{}", result.metadata.version));

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_record;

    #[test]
    fn test_pdf_renders_nonempty_document() {
        let record = sample_record();
        let bytes = render(&record).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_pdf_rendering_is_repeatable() {
        let record = sample_record();
        assert!(render(&record).is_ok());
        assert!(render(&record).is_ok());
    }
}
