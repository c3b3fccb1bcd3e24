// src/utils/debug.rs
use crate::extractors::stats::StatMatch;
use crate::utils::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Marks each match in `text` as `[[metric_key: literal]]`.
/// Matches overlapping an earlier marked match are skipped.
pub fn annotate_matches(text: &str, matches: &[StatMatch]) -> String {
    let mut annotated = String::with_capacity(text.len() + matches.len() * 24);
    let mut sorted = matches.to_vec();
    sorted.sort_by_key(|m| m.start); // Sort by position

    let mut last_pos = 0;
    for m in sorted {
        if m.start < last_pos || m.end > text.len() {
            tracing::trace!("Skipping overlapping match '{}' at {}", m.text, m.start);
            continue;
        }
        annotated.push_str(&text[last_pos..m.start]);
        annotated.push_str(&format!("[[{}: {}]]", m.metric, &text[m.start..m.end]));
        last_pos = m.end;
    }

    // Add any remaining content
    annotated.push_str(&text[last_pos..]);
    annotated
}

/// Writes the normalized text and an annotated copy to `<debug_dir>/`.
/// Returns the path of the annotated file.
pub fn save_debug_text(
    debug_dir: &Path,
    document_name: &str,
    normalized: &str,
    matches: &[StatMatch],
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(debug_dir)?;

    let normalized_path = debug_dir.join(format!("{}_normalized.txt", document_name));
    fs::write(&normalized_path, normalized)?;

    let annotated_path = debug_dir.join(format!("{}_annotated.txt", document_name));
    fs::write(&annotated_path, annotate_matches(normalized, matches))?;

    tracing::info!("Saved debug text to {}", annotated_path.display());
    Ok(annotated_path)
}
