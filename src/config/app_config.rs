use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::listings::{DEFAULT_REALTOR_BASE_URL, DEFAULT_REALTOR_HOST};

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub listings: ListingsConfig,
    pub cache: CacheConfig,
    pub search: SearchSettings,
    pub regions: Vec<CityRegions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Listings provider connection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingsConfig {
    pub base_url: String,
    pub host: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_capacity: u64,
    pub search_max_age_days: u64,
    pub lookup_max_age_days: u64,
    pub purge_after_days: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub region_timeout_secs: u64,
    pub max_concurrent_fetches: usize,
}

/// ZIP codes covering one city
#[derive(Debug, Clone, Deserialize)]
pub struct CityRegions {
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip_codes: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REALTOR_BASE_URL.to_string(),
            host: DEFAULT_REALTOR_HOST.to_string(),
            api_key: None,
            timeout_secs: 15,
            page_size: 200,
        }
    }
}

impl ListingsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 100_000,
            search_max_age_days: 30,
            lookup_max_age_days: 360,
            purge_after_days: 90,
        }
    }
}

impl CacheConfig {
    pub fn search_max_age(&self) -> Duration {
        Duration::from_secs(self.search_max_age_days * SECONDS_PER_DAY)
    }

    pub fn lookup_max_age(&self) -> Duration {
        Duration::from_secs(self.lookup_max_age_days * SECONDS_PER_DAY)
    }

    pub fn purge_after(&self) -> Duration {
        Duration::from_secs(self.purge_after_days * SECONDS_PER_DAY)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            region_timeout_secs: 20,
            max_concurrent_fetches: 4,
        }
    }
}

impl SearchSettings {
    pub fn region_timeout(&self) -> Duration {
        Duration::from_secs(self.region_timeout_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.cache.search_max_age(), Duration::from_secs(30 * 86_400));
        assert_eq!(config.cache.lookup_max_age(), Duration::from_secs(360 * 86_400));
        assert_eq!(config.cache.purge_after(), Duration::from_secs(90 * 86_400));
        assert!(config.listings.api_key.is_none());
        assert!(config.regions.is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "logging": {"format": "json"},
            "cache": {"search_max_age_days": 7},
            "regions": [{"city": "Saint Paul", "state": "MN", "zip_codes": ["55101"]}]
        }))
        .unwrap();

        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.cache.search_max_age_days, 7);
        assert_eq!(config.cache.lookup_max_age_days, 360);
        assert_eq!(config.search.max_concurrent_fetches, 4);
        assert_eq!(config.regions[0].zip_codes, vec!["55101"]);
    }
}
