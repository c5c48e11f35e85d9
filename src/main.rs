//! CRD Scraper main entry point
//!
//! This is the command-line interface for the reaction database scraper.

use anyhow::Context;
use clap::Parser;
use crd_scraper::config::{load_config_with_hash, validate, Config};
use crd_scraper::crawler::crawl;
use crd_scraper::output::{print_statistics, print_store_summary, summarize_store};
use crd_scraper::storage::load_store;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CRD Scraper: collects reaction SMILES from a chemical reaction database
///
/// Walks the archive page, every dataset it links to and every reaction
/// record of those datasets, writing results to a JSON file every few
/// records and at the end of the run.
#[derive(Parser, Debug)]
#[command(name = "crd-scraper")]
#[command(version)]
#[command(about = "Scrapes reaction records from a chemical reaction database", long_about = None)]
struct Cli {
    /// Archive page URL [default: https://kmt.vander-lingen.nl/archive]
    #[arg(long, value_name = "URL")]
    archive_url: Option<String>,

    /// Maximum number of datasets to scrape [default: unbounded]
    #[arg(long, value_name = "N")]
    max_datasets: Option<usize>,

    /// Maximum reactions to pull per dataset [default: 100]
    #[arg(long, value_name = "N")]
    max_reactions_per_dataset: Option<usize>,

    /// Output JSON file [default: scraped_data.json]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print per-dataset reaction counts of an existing output file and exit
    #[arg(long)]
    summarize: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.summarize {
        handle_summarize(&config)
    } else {
        handle_scrape(config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crd_scraper=info,warn"),
            1 => EnvFilter::new("crd_scraper=debug,info"),
            2 => EnvFilter::new("crd_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Command-line flags take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.archive_url {
        config.scraper.archive_url = url.clone();
    }
    if let Some(max) = cli.max_datasets {
        config.scraper.max_datasets = Some(max);
    }
    if let Some(max) = cli.max_reactions_per_dataset {
        config.scraper.max_reactions_per_dataset = max;
    }
    if let Some(path) = &cli.output {
        config.output.data_path = path.display().to_string();
    }
    if let Some(secs) = cli.timeout_secs {
        config.http.timeout_secs = secs;
    }
}

/// Handles the --summarize mode: reports on an existing output file
fn handle_summarize(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.data_path);
    let store = load_store(path).with_context(|| format!("Failed to read {}", path.display()))?;

    print_store_summary(&summarize_store(&store));

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} (max datasets: {}, max reactions per dataset: {})",
        config.scraper.archive_url,
        config
            .scraper
            .max_datasets
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        config.scraper.max_reactions_per_dataset
    );
    tracing::info!("Writing results to {}", config.output.data_path);

    match crawl(config).await {
        Ok(outcome) => {
            if !quiet {
                print_statistics(&outcome.stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_flag_overrides_invalid_file_value() {
        let file = config_file("[http]\ntimeout-secs = 0\n");
        let cli = Cli::parse_from(["crd-scraper", "--timeout-secs", "5"]);

        let mut config = load_configuration(Some(file.path())).unwrap();
        assert!(validate(&config).is_err());

        apply_overrides(&mut config, &cli);
        assert_eq!(config.http.timeout_secs, 5);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_overrides_take_precedence_over_file() {
        let file = config_file(
            "[scraper]\nmax-datasets = 3\nmax-reactions-per-dataset = 7\n\n[output]\ndata-path = \"file.json\"\n",
        );
        let cli = Cli::parse_from([
            "crd-scraper",
            "--max-datasets",
            "0",
            "--output",
            "flag.json",
        ]);

        let mut config = load_configuration(Some(file.path())).unwrap();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.scraper.max_datasets, Some(0));
        assert_eq!(config.scraper.max_reactions_per_dataset, 7);
        assert_eq!(config.output.data_path, "flag.json");
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let config = load_configuration(None).unwrap();
        assert_eq!(config.scraper.checkpoint_interval, 10);
        assert!(validate(&config).is_ok());
    }
}
