use crate::index::types::IndexConfig;
use crate::logging::LogFormat;
use crate::stream::protocol::{Framing, DEFAULT_MAX_MESSAGE_BYTES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "sxi";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the platform config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Framing of input streams when `--framing` is not given
    #[serde(default)]
    pub framing: Framing,

    /// Largest single message accepted, in bytes
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,

    /// Log filter used when neither `-v` nor `RUST_LOG` is set
    /// (e.g. "info", "scenario_index=debug")
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_max_message_bytes() -> usize {
    DEFAULT_MAX_MESSAGE_BYTES
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_message_bytes: default_max_message_bytes(),
            log_level: None,
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the app config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the app config directory
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path().context("Could not determine config directory")?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Stream decoding settings derived from this config
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            framing: self.framing,
            max_message_bytes: self.max_message_bytes,
        }
    }
}

/// Get the path to the config file, if the platform has a config directory
pub fn get_config_path() -> Option<PathBuf> {
    get_app_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the application config directory (not created)
pub fn get_app_config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config; Windows: roaming AppData
        dirs::config_dir()
    };
    base.map(|b| b.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.framing, Framing::Ndjson);
        assert_eq!(config.max_message_bytes, DEFAULT_MAX_MESSAGE_BYTES);
        assert!(config.log_level.is_none());
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"framing": "length-prefixed", "log_level": "debug"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.framing, Framing::LengthPrefixed);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.max_message_bytes, DEFAULT_MAX_MESSAGE_BYTES);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_index_config_follows_app_config() {
        let config = AppConfig {
            framing: Framing::LengthPrefixed,
            max_message_bytes: 1024,
            ..Default::default()
        };
        let index_config = config.index_config();
        assert_eq!(index_config.framing, Framing::LengthPrefixed);
        assert_eq!(index_config.max_message_bytes, 1024);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("sxi_config_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, r#"{"log_format": "json", "max_message_bytes": 4096}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_message_bytes, 4096);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_to_then_load_from() {
        let dir = std::env::temp_dir().join(format!("sxi_config_save_{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE);
        let config = AppConfig {
            framing: Framing::LengthPrefixed,
            log_level: Some("info".to_string()),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppConfig::load_from(Path::new("/nonexistent/sxi/config.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
