// src/extractors/pipeline.rs

// --- Imports ---
use crate::extractors::normalize::{normalize, normalize_bytes};
use crate::extractors::section::Sectionizer;
use crate::extractors::stats::{extract, Metric, StatisticsReport};
use crate::utils::error::ExtractError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// --- Data Structures ---

/// Section name to per-metric matches, in order of first section appearance.
///
/// Only the section map is serialized. Whether a heading was recognized is
/// known when the pipeline builds the result; a reloaded result reports false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    sections: IndexMap<String, StatisticsReport>,
    #[serde(skip)]
    headings_found: bool,
}

// Equal when the same sections appear in the same order with the same matches.
impl PartialEq for ExtractionResult {
    fn eq(&self, other: &Self) -> bool {
        self.sections.iter().eq(other.sections.iter())
    }
}

impl Eq for ExtractionResult {}

impl ExtractionResult {
    pub fn sections(&self) -> impl Iterator<Item = (&str, &StatisticsReport)> {
        self.sections.iter().map(|(name, report)| (name.as_str(), report))
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn get(&self, section: &str) -> Option<&StatisticsReport> {
        self.sections.get(section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn headings_found(&self) -> bool {
        self.headings_found
    }

    /// True when the document had text but no recognized heading,
    /// so everything sits in the default section.
    pub fn is_low_confidence(&self) -> bool {
        !self.headings_found && !self.sections.is_empty()
    }

    /// Match counts per metric key, summed over all sections.
    pub fn totals(&self) -> IndexMap<&'static str, usize> {
        Metric::ALL
            .iter()
            .map(|&metric| {
                let count = self.sections.values().map(|r| r.get(metric).len()).sum();
                (metric.key(), count)
            })
            .collect()
    }
}

// --- Main Pipeline Structure ---

/// Normalizes raw document text, splits it into sections and extracts
/// statistics from each section.
#[derive(Debug, Clone, Default)]
pub struct StatisticsPipeline {
    sectionizer: Sectionizer,
}

impl StatisticsPipeline {
    pub fn new(sectionizer: Sectionizer) -> Self {
        Self { sectionizer }
    }

    pub fn sectionizer(&self) -> &Sectionizer {
        &self.sectionizer
    }

    pub fn run(&self, raw_text: &str) -> ExtractionResult {
        let normalized = normalize(raw_text);
        self.run_normalized(&normalized)
    }

    /// Like [`Self::run`] for a raw byte buffer; fails if it is not text.
    pub fn run_bytes(&self, raw: &[u8]) -> Result<ExtractionResult, ExtractError> {
        let normalized = normalize_bytes(raw)?;
        Ok(self.run_normalized(&normalized))
    }

    /// Runs segmentation and extraction on text that is already normalized.
    ///
    /// Matching always sees line breaks as spaces, so a statistic wrapped
    /// across lines is found whether or not the document has headings.
    pub fn run_normalized(&self, normalized: &str) -> ExtractionResult {
        let (sections, headings_found) = self.sectionizer.segment_with_status(normalized);
        let sections = sections
            .into_iter()
            .map(|(name, content)| {
                let report = extract(&content.replace('\n', " "));
                tracing::debug!("Section '{}': {} statistics", name, report.total());
                (name, report)
            })
            .collect();

        let result = ExtractionResult { sections, headings_found };
        if result.is_low_confidence() {
            tracing::warn!("No section headings recognized; results are lower-confidence");
        }
        result
    }
}

/// Runs the whole pipeline with default settings.
pub fn extract_document(raw_text: &str) -> ExtractionResult {
    StatisticsPipeline::default().run(raw_text)
}
