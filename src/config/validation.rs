use crate::config::types::{Config, HttpConfig, OutputConfig, ScraperConfig, SiteConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_scraper_config(&config.scraper)?;
    validate_http_config(&config.http)?;
    validate_site_config(&config.site)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl bounds
fn validate_scraper_config(config: &ScraperConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.archive_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid archive URL '{}': {}", config.archive_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Archive URL '{}' must use HTTP or HTTPS",
            config.archive_url
        )));
    }

    if config.checkpoint_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "checkpoint_interval must be >= 1, got {}",
            config.checkpoint_interval
        )));
    }

    if config.max_dataset_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_dataset_pages must be >= 1, got {}",
            config.max_dataset_pages
        )));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates link prefixes
fn validate_site_config(config: &SiteConfig) -> ConfigResult<()> {
    validate_prefix("dataset_prefix", &config.dataset_prefix)?;
    validate_prefix("record_prefix", &config.record_prefix)?;
    Ok(())
}

fn validate_prefix(name: &str, prefix: &str) -> ConfigResult<()> {
    if !prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/', got '{}'",
            name, prefix
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.data_path.is_empty() {
        return Err(ConfigError::Validation(
            "data_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_archive_url() {
        let mut config = Config::default();
        config.scraper.archive_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.scraper.archive_url = "ftp://example.com/archive".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("record_prefix", "/id/").is_ok());
        assert!(validate_prefix("record_prefix", "id/").is_err());
        assert!(validate_prefix("record_prefix", "").is_err());
    }

    #[test]
    fn test_empty_data_path_rejected() {
        let mut config = Config::default();
        config.output.data_path.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_datasets_is_valid() {
        let mut config = Config::default();
        config.scraper.max_datasets = Some(0);
        assert!(validate(&config).is_ok());
    }
}
