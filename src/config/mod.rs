//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, CityRegions, ListingsConfig, LogFormat, LoggingConfig, SearchSettings,
};
