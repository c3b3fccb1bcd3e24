// src/extractors/mod.rs
pub mod normalize;
pub mod pipeline;
pub mod section;
pub mod stats;

// Re-export key extraction types for convenience
pub use normalize::{normalize, normalize_bytes};
pub use pipeline::{extract_document, ExtractionResult, StatisticsPipeline};
pub use section::{segment, Section, Sectionizer, DEFAULT_SECTION};
pub use stats::{extract, find_matches, Metric, StatMatch, StatisticsReport};
