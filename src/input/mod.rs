//! Resume file text extraction
//!
//! Uploaded files are converted to plain text before entering the
//! pipeline. Format is decided by the file extension of the uploaded name.

use crate::error::{AtsAnalyzerError, Result};
use std::path::Path;

/// Extracts plain text from an uploaded resume file.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "txt" | "md" => String::from_utf8_lossy(bytes).into_owned(),
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AtsAnalyzerError::Extraction(format!("Failed to extract PDF text: {}", e))
        })?,
        other => {
            return Err(AtsAnalyzerError::Extraction(format!(
                "Unsupported file type '{}'; supported: txt, md, pdf",
                other
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(AtsAnalyzerError::Extraction(format!(
            "No text could be extracted from {}",
            filename
        )));
    }
    Ok(text)
}
