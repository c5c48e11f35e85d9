//! Statistics for a scraping run
//!
//! Counters are updated by the coordinator as datasets and records are
//! processed and are logged once the run finishes.

use chrono::{DateTime, Utc};

/// Counters collected over one scraping run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Dataset links found on the archive page
    pub datasets_discovered: u64,

    /// Datasets whose page was fetched
    pub datasets_processed: u64,

    /// Datasets skipped because their page could not be fetched
    pub datasets_failed: u64,

    /// Record links selected across all datasets
    pub records_discovered: u64,

    /// Records parsed and inserted into the store
    pub records_scraped: u64,

    /// Records skipped on fetch or parse failure
    pub records_failed: u64,

    /// Checkpoints successfully written
    pub checkpoints_written: u64,

    /// Checkpoint writes that failed
    pub checkpoints_failed: u64,
}

impl CrawlStatistics {
    /// Starts a new set of counters stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            datasets_discovered: 0,
            datasets_processed: 0,
            datasets_failed: 0,
            records_discovered: 0,
            records_scraped: 0,
            records_failed: 0,
            checkpoints_written: 0,
            checkpoints_failed: 0,
        }
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Returns the record success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.records_scraped + self.records_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.records_scraped as f64 / attempted as f64) * 100.0
    }

    /// Logs a one-line summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Scrape finished: {} datasets ({} failed), {} records ({} failed), {} checkpoints ({} failed)",
            self.datasets_processed,
            self.datasets_failed,
            self.records_scraped,
            self.records_failed,
            self.checkpoints_written,
            self.checkpoints_failed
        );
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::start()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {:.1}s", duration);
    }
    println!();

    println!("Datasets:");
    println!("  Discovered: {}", stats.datasets_discovered);
    println!("  Processed: {}", stats.datasets_processed);
    println!("  Failed: {}", stats.datasets_failed);
    println!();

    println!("Records:");
    println!("  Discovered: {}", stats.records_discovered);
    println!("  Scraped: {}", stats.records_scraped);
    println!("  Failed: {}", stats.records_failed);
    println!();

    println!("Checkpoints:");
    println!("  Written: {}", stats.checkpoints_written);
    println!("  Failed: {}", stats.checkpoints_failed);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} records scraped)",
        stats.success_rate(),
        stats.records_scraped,
        stats.records_scraped + stats.records_failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_zeroed() {
        let stats = CrawlStatistics::start();
        assert_eq!(stats.records_scraped, 0);
        assert_eq!(stats.datasets_processed, 0);
        assert!(stats.finished_at.is_none());
        assert!(stats.duration_seconds().is_none());
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut stats = CrawlStatistics::start();
        stats.finish();
        assert!(stats.finished_at.is_some());
        assert!(stats.duration_seconds().unwrap() >= 0.0);
    }

    #[test]
    fn test_success_rate() {
        let mut stats = CrawlStatistics::start();
        stats.records_scraped = 80;
        stats.records_failed = 20;

        assert!((stats.success_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_zero_records() {
        let stats = CrawlStatistics::start();
        assert_eq!(stats.success_rate(), 0.0);
    }
}
