// src/storage/mod.rs
use crate::extractors::pipeline::ExtractionResult;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the extraction result as `<document_name>_stats.json`
    pub fn save_results(
        &self,
        document_name: &str,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_stats.json", document_name));

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved results to {}", file_path.display());
        Ok(file_path)
    }

    /// Loads a result file written by [`Self::save_results`]
    pub fn load_results<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult, StorageError> {
        let content = fs::read_to_string(path.as_ref()).map_err(StorageError::IoError)?;
        serde_json::from_str(&content).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Saves metadata about the extraction in JSON format
    pub fn save_metadata(
        &self,
        document_name: &str,
        source: &Path,
        result: &ExtractionResult,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_stats_meta.json", document_name));

        let metadata = serde_json::json!({
            "document": document_name,
            "source_path": source.display().to_string(),
            "sections": result.section_names(),
            "section_count": result.len(),
            "totals": result.totals(),
            "headings_found": result.headings_found(),
            "low_confidence": result.is_low_confidence(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
