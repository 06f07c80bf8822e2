//! Configuration for the admin tooling

use menutree_confirm::GateConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main admin configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Delete-confirmation gate settings
    #[serde(default)]
    pub confirmation: GateConfig,

    /// Restaurant catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the restaurant catalog is seeded from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file holding an array of restaurants; empty directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AdminConfig {
    /// Load configuration: defaults, then an optional file, then
    /// `MENUTREE_`-prefixed environment variables
    /// (e.g. `MENUTREE_CONFIRMATION__ENTITY_KIND=menu`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&AdminConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MENUTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
