//! Configuration store
//!
//! TOML config loaded from `<config_dir>/prcoach/config.toml`. Everything
//! has a default, so the file is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::conversation::engine::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};
use crate::error::{CoachError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Reply delay range
    #[serde(default)]
    pub pacing: PacingConfig,

    /// State file location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Display preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CoachError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoachError::Serialization(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => return config,
                    Err(err) => {
                        warn!("[Config] ignoring unusable config file: {}", err);
                    }
                }
            }
        }

        Self::default()
    }

    /// Save to the default location, returning the path written
    pub fn save_default(&self) -> Result<PathBuf> {
        let path = Self::default_path().ok_or(CoachError::ConfigDirUnavailable)?;
        self.save(&path)?;
        Ok(path)
    }

    /// Default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("prcoach").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.pacing.min_delay_ms > self.pacing.max_delay_ms {
            return Err(CoachError::InvalidConfig {
                message: "pacing.min_delay_ms must not exceed pacing.max_delay_ms".to_string(),
            });
        }
        Ok(())
    }
}

/// Reply delay range, sampled per submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Lower bound in milliseconds
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound (exclusive) in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_min_delay_ms() -> u64 {
    DEFAULT_MIN_DELAY_MS
}

fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

/// State file location override
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Explicit state file path; platform default when unset
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Name shown beside assistant turns
    #[serde(default = "default_assistant_label")]
    pub assistant_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            assistant_label: default_assistant_label(),
        }
    }
}

fn default_assistant_label() -> String {
    "アシスタント".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.pacing.min_delay_ms, 1000);
        assert_eq!(config.pacing.max_delay_ms, 2000);
        assert_eq!(config.storage.state_path, None);
        assert_eq!(config.ui.assistant_label, "アシスタント");
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.pacing.min_delay_ms = 200;
        config.pacing.max_delay_ms = 500;
        config.storage.state_path = Some(temp_dir.path().join("state.json"));
        config.save(&config_path).unwrap();

        let loaded = Config::load(&config_path).unwrap();
        assert_eq!(loaded.pacing.min_delay_ms, 200);
        assert_eq!(loaded.pacing.max_delay_ms, 500);
        assert_eq!(
            loaded.storage.state_path,
            Some(temp_dir.path().join("state.json"))
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[pacing]\nmin_delay_ms = 100\n").unwrap();

        let loaded = Config::load(&config_path).unwrap();
        assert_eq!(loaded.pacing.min_delay_ms, 100);
        assert_eq!(loaded.pacing.max_delay_ms, 2000);
        assert_eq!(loaded.ui.assistant_label, "アシスタント");
    }

    #[test]
    fn test_inverted_pacing_range_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[pacing]\nmin_delay_ms = 3000\nmax_delay_ms = 2000\n",
        )
        .unwrap();

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(CoachError::InvalidConfig { .. })));
    }

    #[test]
    fn test_toml_format() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.pacing.min_delay_ms, config.pacing.min_delay_ms);
    }
}
