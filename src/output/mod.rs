//! Output module for run statistics and result summaries
//!
//! This module handles:
//! - Recording counters over a scraping run
//! - Summarizing an existing output file per dataset

pub mod stats;
mod summary;

pub use stats::{print_statistics, CrawlStatistics};
pub use summary::{print_store_summary, summarize_store, StoreSummary};
