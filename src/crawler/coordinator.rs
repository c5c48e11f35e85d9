//! Scrape coordinator - main orchestration logic
//!
//! This module contains the scrape loop that walks archive → datasets →
//! records, strictly one request at a time:
//! - Fetching the archive page (the only fatal step)
//! - Collecting record links per dataset, following pagination
//! - Fetching and parsing each record page
//! - Checkpointing the result store every N scraped records and at the end

use crate::config::Config;
use crate::crawler::links::{extract_links, parse_listing};
use crate::crawler::record::parse_record;
use crate::crawler::{build_http_client, fetch_page};
use crate::output::CrawlStatistics;
use crate::storage::{CheckpointSink, ResultStore};
use crate::url::{dataset_id_from_url, record_id_from_url};
use crate::Result;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Result of a completed scrape
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Everything scraped during the run
    pub store: ResultStore,

    /// Counters collected during the run
    pub stats: CrawlStatistics,
}

/// Main scrape coordinator structure
///
/// Owns the result store for the duration of a run and hands snapshots of it
/// to the checkpoint sink.
pub struct Coordinator<S: CheckpointSink> {
    config: Config,
    client: Client,
    sink: S,
    store: ResultStore,
    stats: CrawlStatistics,
}

impl<S: CheckpointSink> Coordinator<S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `sink` - Where checkpoints are written
    pub fn new(config: Config, sink: S) -> Result<Self> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            client,
            sink,
            store: ResultStore::new(),
            stats: CrawlStatistics::start(),
        })
    }

    /// Returns the checkpoint sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the scrape
    ///
    /// 1. Fetch the archive page; failure here aborts the run
    /// 2. Extract dataset links, truncated to `max_datasets`
    /// 3. For each dataset, collect up to `max_reactions_per_dataset` record links
    /// 4. Fetch and parse each record, inserting it into the store
    /// 5. Checkpoint after every `checkpoint_interval` scraped records
    /// 6. Checkpoint once more at the end
    ///
    /// Failures after step 1 are logged and skipped; the run always finishes
    /// with whatever was scraped.
    pub async fn run(&mut self) -> Result<CrawlOutcome> {
        self.store = ResultStore::new();
        self.stats = CrawlStatistics::start();

        let archive_url = Url::parse(&self.config.scraper.archive_url)?;
        tracing::info!("Fetching archive page {}", archive_url);

        let archive_html = match fetch_page(&self.client, &archive_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to fetch archive page {}: {}", archive_url, e);
                return Err(e);
            }
        };

        let mut dataset_links = extract_links(
            &archive_html,
            &archive_url,
            &self.config.site.dataset_prefix,
        );
        self.stats.datasets_discovered = dataset_links.len() as u64;

        if let Some(max) = self.config.scraper.max_datasets {
            dataset_links.truncate(max);
        }
        tracing::info!(
            "Found {} dataset links, scraping {}",
            self.stats.datasets_discovered,
            dataset_links.len()
        );

        for dataset_url in &dataset_links {
            self.process_dataset(dataset_url).await;
        }

        self.checkpoint();
        self.stats.finish();
        self.stats.log_summary();

        Ok(CrawlOutcome {
            store: std::mem::take(&mut self.store),
            stats: self.stats.clone(),
        })
    }

    /// Scrapes one dataset; failures are logged, never returned
    async fn process_dataset(&mut self, dataset_url: &Url) {
        let dataset_id = dataset_id_from_url(dataset_url, &self.config.site.dataset_prefix);
        tracing::info!(dataset = %dataset_id, "Scraping dataset {}", dataset_url);

        let record_links = match self.collect_record_links(dataset_url, &dataset_id).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(
                    dataset = %dataset_id,
                    url = %dataset_url,
                    error = %e,
                    "Skipping dataset: page fetch failed"
                );
                self.stats.datasets_failed += 1;
                return;
            }
        };

        self.store.ensure_dataset(&dataset_id);
        self.stats.datasets_processed += 1;
        self.stats.records_discovered += record_links.len() as u64;
        tracing::debug!(dataset = %dataset_id, "{} record links", record_links.len());

        for record_url in &record_links {
            self.process_record(&dataset_id, record_url).await;
        }
    }

    /// Gathers record links from a dataset page and the pages following it
    ///
    /// Only a failure on the first page is returned; a failed follow-up page
    /// ends pagination with the links gathered so far.
    async fn collect_record_links(
        &self,
        dataset_url: &Url,
        dataset_id: &str,
    ) -> Result<Vec<Url>> {
        let limit = self.config.scraper.max_reactions_per_dataset;
        let max_pages = self.config.scraper.max_dataset_pages;

        let mut links = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(dataset_url.clone());
        let mut pages = 0;

        while let Some(page_url) = next.take() {
            if pages > 0 && (links.len() >= limit || pages >= max_pages) {
                break;
            }
            if !visited.insert(page_url.clone()) {
                tracing::debug!(dataset = %dataset_id, "Pagination loop at {}", page_url);
                break;
            }

            let html = match fetch_page(&self.client, &page_url).await {
                Ok(html) => html,
                Err(e) if pages == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        dataset = %dataset_id,
                        url = %page_url,
                        error = %e,
                        "Stopping pagination: page fetch failed"
                    );
                    break;
                }
            };
            pages += 1;

            let listing = parse_listing(&html, &page_url, &self.config.site.record_prefix);
            if listing.links.is_empty() {
                break;
            }
            links.extend(listing.links);
            next = listing.next_page;
        }

        links.truncate(limit);
        Ok(links)
    }

    /// Scrapes one record; failures are logged, never returned
    async fn process_record(&mut self, dataset_id: &str, record_url: &Url) {
        let record_id = record_id_from_url(record_url);

        let html = match fetch_page(&self.client, record_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    dataset = %dataset_id,
                    record = %record_id,
                    url = %record_url,
                    error = %e,
                    "Skipping record: page fetch failed"
                );
                self.stats.records_failed += 1;
                return;
            }
        };

        let record = match parse_record(&html, record_url.as_str()) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    dataset = %dataset_id,
                    record = %record_id,
                    url = %record_url,
                    error = %e,
                    "Skipping record: unexpected page content"
                );
                self.stats.records_failed += 1;
                return;
            }
        };

        if self.store.insert(dataset_id, &record_id, record).is_some() {
            tracing::debug!(dataset = %dataset_id, record = %record_id, "Replaced duplicate record");
        }
        self.stats.records_scraped += 1;

        let interval = self.config.scraper.checkpoint_interval.max(1) as u64;
        if self.stats.records_scraped % interval == 0 {
            tracing::info!(
                "Progress: {} records scraped, {} datasets done",
                self.stats.records_scraped,
                self.stats.datasets_processed
            );
            self.checkpoint();
        }
    }

    /// Writes a snapshot of the store; a failed write is logged, not returned
    fn checkpoint(&mut self) {
        match self.sink.save(&self.store) {
            Ok(()) => self.stats.checkpoints_written += 1,
            Err(e) => {
                tracing::error!("Checkpoint write failed: {}", e);
                self.stats.checkpoints_failed += 1;
            }
        }
    }
}

/// Runs a complete scrape with the given checkpoint sink
///
/// # Example
///
/// ```no_run
/// use crd_scraper::config::Config;
/// use crd_scraper::crawler::run_crawl;
/// use crd_scraper::storage::JsonCheckpointWriter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let writer = JsonCheckpointWriter::new(&config.output.data_path);
/// let outcome = run_crawl(config, writer).await?;
/// println!("{} records", outcome.store.record_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<S: CheckpointSink>(
    config: Config,
    sink: S,
) -> Result<CrawlOutcome> {
    let mut coordinator = Coordinator::new(config, sink)?;
    coordinator.run().await
}
