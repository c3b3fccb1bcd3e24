// src/lib.rs
//! Extracts reported statistics (p-values, confidence intervals, sample sizes,
//! effect sizes) from the plain text of research papers, per document section.
pub mod extractors;
pub mod source;
pub mod storage;
pub mod utils;

pub use extractors::{extract_document, ExtractionResult, StatisticsPipeline};
pub use utils::AppError;
