// src/extractors/normalize.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Any whitespace except line-feed: spaces, tabs, form feeds (PDF page breaks), NBSP, ...
static HORIZONTAL_WS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\S\n]+").expect("Failed to compile HORIZONTAL_WS_RE")
});

// A line break together with the spaces and blank lines around it
static LINE_BREAK_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r" ?\n[ \n]*").expect("Failed to compile LINE_BREAK_RUN_RE")
});

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Collapses whitespace noise in raw extracted text into a line-oriented form.
///
/// The output has no run of spaces longer than one, no blank lines, no
/// spaces next to a line-feed and no leading or trailing whitespace.
/// Carriage returns (`\r\n` and lone `\r`) are treated as line breaks.
pub fn normalize(text: &str) -> String {
    let text = text.trim_start_matches(BYTE_ORDER_MARK);
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let spaced = HORIZONTAL_WS_RE.replace_all(&unified, " ");
    let collapsed = LINE_BREAK_RUN_RE.replace_all(&spaced, "\n");
    let normalized = collapsed.trim().to_string();

    tracing::trace!(
        "Normalized text: {} -> {} bytes, {} lines",
        text.len(),
        normalized.len(),
        normalized.lines().count()
    );
    normalized
}

/// Validates a raw byte buffer as text and normalizes it.
///
/// Bytes that are not UTF-8 are a contract violation by the document reader,
/// reported as [`ExtractError::InvalidInput`].
pub fn normalize_bytes(raw: &[u8]) -> Result<String, ExtractError> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        ExtractError::InvalidInput(format!(
            "document is not valid UTF-8 text (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;
    Ok(normalize(text))
}
