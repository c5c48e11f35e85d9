use serde::Deserialize;

/// The archive endpoint of the Chemical Reaction Database
pub const DEFAULT_ARCHIVE_URL: &str = "https://kmt.vander-lingen.nl/archive";

/// Default output file
pub const DEFAULT_DATA_PATH: &str = "scraped_data.json";

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl bounds and checkpoint cadence
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Archive page listing all datasets
    #[serde(rename = "archive-url")]
    pub archive_url: String,

    /// Maximum number of datasets to scrape (unbounded when absent)
    #[serde(rename = "max-datasets")]
    pub max_datasets: Option<usize>,

    /// Maximum number of reaction records per dataset
    #[serde(rename = "max-reactions-per-dataset")]
    pub max_reactions_per_dataset: usize,

    /// Number of scraped records between checkpoints
    #[serde(rename = "checkpoint-interval")]
    pub checkpoint_interval: usize,

    /// Maximum number of pages followed within one dataset
    #[serde(rename = "max-dataset-pages")]
    pub max_dataset_pages: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            max_datasets: None,
            max_reactions_per_dataset: 100,
            checkpoint_interval: 10,
            max_dataset_pages: 50,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total time allowed for one request, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("crd-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Link conventions of the archive site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Path prefix of dataset pages linked from the archive
    #[serde(rename = "dataset-prefix")]
    pub dataset_prefix: String,

    /// Path prefix of reaction record pages linked from a dataset page
    #[serde(rename = "record-prefix")]
    pub record_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dataset_prefix: "/data/reaction/doi/".to_string(),
            record_prefix: "/id/".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON checkpoint file
    #[serde(rename = "data-path")]
    pub data_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}
