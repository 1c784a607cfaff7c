//! Configuration management for the ATS analyzer
//!
//! All scoring thresholds and the default weight table are loaded once at
//! startup and passed by reference into each pipeline invocation. Nothing in
//! here is mutated at runtime.

use crate::error::{AtsAnalyzerError, Result};
use crate::scoring::category::WeightConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Thresholds for the category scorers and the red flag detector.
/// Strict mode swaps in the `strict_*` variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: WeightConfig,
    /// Points subtracted from the red_flags category per detected flag.
    pub flag_penalty: f64,
    pub strict_flag_penalty: f64,
    /// Employment gap (years) above which a red flag is raised.
    pub employment_gap_years: i32,
    pub strict_employment_gap_years: i32,
    /// Tenure (years) below which a role counts toward job hopping.
    pub short_tenure_years: f64,
    pub strict_short_tenure_years: f64,
    /// Roles ending within this many years count as recent.
    pub recent_window_years: i32,
    /// Evidence snippets kept per category result.
    pub max_evidence: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Capacity bound; the oldest record is evicted on overflow.
    pub max_records: usize,
    /// Records older than this are treated as expired on retrieval.
    pub ttl_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            flag_penalty: 15.0,
            strict_flag_penalty: 25.0,
            employment_gap_years: 2,
            strict_employment_gap_years: 1,
            short_tenure_years: 1.0,
            strict_short_tenure_years: 1.5,
            recent_window_years: 3,
            max_evidence: 3,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: 1024,
            ttl_minutes: 24 * 60,
        }
    }
}

impl ScoringConfig {
    pub fn flag_penalty_for(&self, strict: bool) -> f64 {
        if strict {
            self.strict_flag_penalty
        } else {
            self.flag_penalty
        }
    }

    pub fn employment_gap_for(&self, strict: bool) -> i32 {
        if strict {
            self.strict_employment_gap_years
        } else {
            self.employment_gap_years
        }
    }

    pub fn short_tenure_for(&self, strict: bool) -> f64 {
        if strict {
            self.strict_short_tenure_years
        } else {
            self.short_tenure_years
        }
    }
}

impl Config {
    /// Loads the config file if one exists, otherwise falls back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                AtsAnalyzerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AtsAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("ATS_ANALYZER_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-analyzer")
            .join("config.toml")
    }
}
