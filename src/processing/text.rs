//! Text normalization and snippet extraction

use unicode_segmentation::UnicodeSegmentation;

/// Number of words of context kept on each side of a snippet hit.
const SNIPPET_CONTEXT_WORDS: usize = 10;

/// Normalizes raw document text into a canonical form: lowercased, bullet
/// markers stripped, runs of spaces and tabs collapsed. Line structure is
/// preserved because the requirement extractor and resume parser are
/// line-oriented.
pub fn normalize(text: &str) -> String {
    let mut lines = Vec::new();
    for line in text.lines() {
        let stripped = strip_bullet(line.trim());
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        lines.push(collapsed.to_lowercase());
    }
    lines.join("\n")
}

/// Normalized text flattened to a single line, for substring matching.
pub fn normalize_flat(text: &str) -> String {
    normalize(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered token stream over the normalized text.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .unicode_words()
        .map(|w| w.to_string())
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start_matches(['•', '●', '▪', '-', '*', '·', '—']);
    trimmed.trim_start()
}

/// Finds the first occurrence of `term` in `text` (case-insensitive) and
/// returns a bounded `...context...` window around it. Empty string when the
/// term is absent.
pub fn find_snippet(text: &str, term: &str) -> String {
    let haystack = text.to_lowercase();
    let needle = term.to_lowercase();
    let Some(idx) = haystack.find(&needle) else {
        return String::new();
    };

    let before: Vec<&str> = text[..idx].split_whitespace().collect();
    let start = before.len().saturating_sub(SNIPPET_CONTEXT_WORDS);
    let after: Vec<&str> = text[idx..].split_whitespace().collect();
    let end = after.len().min(SNIPPET_CONTEXT_WORDS + 1);

    let mut window: Vec<&str> = Vec::with_capacity(end + before.len() - start);
    window.extend(&before[start..]);
    window.extend(&after[..end]);

    format!("...{}...", window.join(" "))
}
