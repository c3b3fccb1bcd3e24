// src/source/mod.rs
use crate::utils::error::SourceError;
use std::path::Path;

/// Reads a document's raw bytes.
/// The bytes are handed to the core unchanged; text validation happens there.
pub async fn read_document(path: &Path) -> Result<Vec<u8>, SourceError> {
    tracing::info!("Reading document from: {}", path.display());

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            tracing::warn!("Document not found: {}", path.display());
            SourceError::NotFound(path.display().to_string())
        } else {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            SourceError::Io { path: path.display().to_string(), source: e }
        }
    })?;

    tracing::debug!("Successfully read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Reads a document, substituting an empty buffer if it cannot be read.
/// An empty document yields no sections and no matches downstream.
pub async fn read_document_or_empty(path: &Path) -> Vec<u8> {
    match read_document(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Treating unreadable document as empty: {}", e);
            Vec::new()
        }
    }
}

/// Short name used for output files: the file stem, or "document".
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("document")
        .to_string()
}
