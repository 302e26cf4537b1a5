//! Configuration management for Keys Check
//!
//! Startup preferences are read from a platform-specific config file. Only
//! preferences live here; press counts, device names and the dark-mode
//! toggle are never written back.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keys-check/config.toml` |
//! | macOS | `~/Library/Application Support/keys-check/config.toml` |
//! | Windows | `%APPDATA%\keys-check\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use keys_check::Config;
//!
//! let config = Config::load().unwrap_or_default();
//! println!("Toasts stay for {}s", config.ui.toast_duration_secs);
//! ```

use crate::device::DEFAULT_SYSFS_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Directory holding the config file
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join("keys-check"))
}

/// Returns the path to the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
    /// USB device lookup settings
    #[serde(default)]
    pub device: DeviceConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme at startup (dark/light)
    pub theme: Theme,
    /// How long a toast notification stays visible
    pub toast_duration_secs: u64,
    /// Maximum number of toasts shown at once
    pub max_toasts: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            theme: Theme::Light,
            toast_duration_secs: 5,
            max_toasts: 4,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// USB device lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Directory listing USB devices (Linux sysfs)
    pub sysfs_root: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `KEYS_CHECK_LOG`
    pub level: String,
    /// Log file; defaults to the platform cache directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }

    /// Get toast lifetime as Duration, never shorter than a second
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.ui.toast_duration_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("keys-check-test-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.ui.refresh_rate_hz, 60);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.ui.toast_duration_secs, 5);
        assert_eq!(config.ui.max_toasts, 4);
        assert_eq!(config.device.sysfs_root, PathBuf::from("/sys/bus/usb/devices"));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn config_refresh_interval() {
        let config = Config::default();
        // 60 Hz = 16666 microseconds per frame
        assert_eq!(config.refresh_interval().as_micros(), 16666);
    }

    #[test]
    fn zero_refresh_rate_does_not_divide_by_zero() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 0;
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut config = Config::default();
        config.ui.theme = Theme::Dark;
        config.ui.toast_duration_secs = 2;
        config.logging.file = Some(PathBuf::from("/tmp/kc.log"));

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");

        assert_eq!(loaded.ui.theme, Theme::Dark);
        assert_eq!(loaded.ui.toast_duration_secs, 2);
        assert_eq!(loaded.logging.file, Some(PathBuf::from("/tmp/kc.log")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_load_missing_file_is_error() {
        let result = Config::load_from(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn config_load_invalid_toml_is_parse_error() {
        let path = temp_config_path("invalid");
        fs::write(&path, "[ui\nrefresh_rate_hz = ").unwrap();
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_deserializes_partial_toml() {
        let toml_str = r#"
[ui]
refresh_rate_hz = 144
theme = "Dark"
toast_duration_secs = 3
max_toasts = 2
"#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");

        assert_eq!(config.ui.refresh_rate_hz, 144);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.toast_duration_secs, 3);
        assert_eq!(config.ui.max_toasts, 2);
        // Missing sections fall back to defaults
        assert_eq!(config.device.sysfs_root, PathBuf::from(DEFAULT_SYSFS_ROOT));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_fills_missing_section_fields() {
        let config: Config = toml::from_str("[ui]\ntheme = \"Dark\"\n").expect("Failed to deserialize");
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.refresh_rate_hz, 60);
        assert_eq!(config.ui.toast_duration_secs, 5);
        assert_eq!(config.ui.max_toasts, 4);

        let config: Config =
            toml::from_str("[logging]\nfile = \"/tmp/x.log\"\n").expect("Failed to deserialize");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/x.log")));
        assert_eq!(config.logging.level, "info");

        let config: Config = toml::from_str("[device]\n").expect("Failed to deserialize");
        assert_eq!(config.device.sysfs_root, PathBuf::from(DEFAULT_SYSFS_ROOT));
    }

    #[test]
    fn zero_toast_duration_is_clamped() {
        let mut config = Config::default();
        config.ui.toast_duration_secs = 0;
        assert_eq!(config.toast_duration(), Duration::from_secs(1));
    }

    #[test]
    fn config_serializes_to_toml() {
        let toml_str = toml::to_string_pretty(&Config::default()).expect("Failed to serialize");
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("[device]"));
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("theme = \"Light\""));
        assert!(!toml_str.contains("file ="));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::NoConfigDir;
        assert_eq!(err.to_string(), "Could not determine config directory");

        let io_err = ConfigError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
