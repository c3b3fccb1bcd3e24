// src/main.rs
use clap::Parser;
use stat_extractor::extractors::{find_matches, normalize_bytes, Sectionizer, StatisticsPipeline};
use stat_extractor::source;
use stat_extractor::storage::StorageManager;
use stat_extractor::utils::{self, AppError};
use std::path::PathBuf;

/// Command Line Interface for extracting statistics from research papers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plain-text documents (text already extracted from the paper)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for result files
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Section name for text before the first recognized heading
    #[arg(long, default_value = "UNLABELED")]
    default_section: String,

    /// Also write a metadata file per document
    #[arg(long)]
    metadata: bool,

    /// Debug mode - save normalized and annotated text for each document
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(if args.verbose { "debug" } else { "info" });
    tracing::info!("Starting processing for args: {:?}", args);

    // 2. Initialize storage and pipeline
    if args.output_dir.is_file() {
        return Err(AppError::Config(format!(
            "Output path {} exists and is not a directory",
            args.output_dir.display()
        )));
    }
    let storage = StorageManager::new(&args.output_dir)?;
    let sectionizer = Sectionizer::with_default_section(&args.default_section);
    let pipeline = StatisticsPipeline::new(sectionizer);

    // 3. Process each document
    let mut success_count = 0;
    let mut failure_count = 0;

    for input in &args.inputs {
        match process_document(&args, &storage, &pipeline, input).await {
            Ok(path) => {
                println!("{}", path.display());
                success_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", input.display(), e);
                failure_count += 1;
            }
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract statistics from any of {} documents",
            failure_count
        )));
    }

    Ok(())
}

async fn process_document(
    args: &Args,
    storage: &StorageManager,
    pipeline: &StatisticsPipeline,
    input: &std::path::Path,
) -> Result<PathBuf, AppError> {
    let name = source::document_name(input);
    let raw = source::read_document_or_empty(input).await;

    let normalized = normalize_bytes(&raw)?;
    let result = pipeline.run_normalized(&normalized);
    tracing::info!(
        "Extracted {} sections from {} ({:?})",
        result.len(),
        input.display(),
        result.totals()
    );

    if args.debug {
        let debug_dir = args.output_dir.join("debug");
        // Same byte offsets as `normalized`; matches may span line breaks
        let matches = find_matches(&normalized.replace('\n', " "));
        if let Err(e) = utils::debug::save_debug_text(&debug_dir, &name, &normalized, &matches) {
            tracing::warn!("Failed to write debug text: {}", e);
        }
    }

    let path = storage.save_results(&name, &result)?;

    if args.metadata {
        match storage.save_metadata(&name, input, &result) {
            Ok(meta_path) => tracing::info!("Saved metadata to: {}", meta_path.display()),
            Err(e) => tracing::error!("Failed to save metadata: {}", e),
        }
    }

    Ok(path)
}
