//! Crawler module for page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with an explicit timeout
//! - Link extraction from archive and dataset pages
//! - Reaction record page parsing
//! - Overall scrape coordination and checkpointing

mod coordinator;
mod fetcher;
mod links;
mod record;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page};
pub use links::{extract_links, parse_listing, ListingPage};
pub use record::parse_record;

use crate::config::Config;
use crate::storage::JsonCheckpointWriter;
use crate::Result;

/// Runs a complete scrape, checkpointing to the configured JSON file
///
/// This is the main entry point for starting a scrape. It will:
/// 1. Initialize the output file with an empty object
/// 2. Build the HTTP client
/// 3. Walk archive → datasets → records
/// 4. Write checkpoints periodically and at the end
///
/// A file that cannot be written is logged like any failed checkpoint; the
/// scrape still runs and its results are returned in memory.
pub async fn crawl(config: Config) -> Result<CrawlOutcome> {
    let writer = JsonCheckpointWriter::new(&config.output.data_path);
    if let Err(e) = writer.reset() {
        tracing::error!(
            path = %writer.path().display(),
            error = %e,
            "Failed to initialize output file"
        );
    }
    run_crawl(config, writer).await
}
