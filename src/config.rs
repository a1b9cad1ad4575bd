//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$POSTBOX_CONFIG` (environment variable)
//! 2. `~/.config/postbox/config.toml` (Linux/macOS)
//!    `%APPDATA%\postbox\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! Only the ambient settings this MUA actually uses: which base directory
//! to open by default, how verbose to log, and the `strftime` pattern used
//! when the REPL echoes a `Date` header for humans (the on-disk encoding is
//! always RFC 5322 via [`crate::util::date`], independent of this setting).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory to open when the CLI is invoked with no argument.
    pub base_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// `strftime` format string used to display a message's `Date` header.
    pub date_display_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            log_level: "warn".to_string(),
            date_display_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

/// Load configuration, searching standard locations. Returns the default
/// configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read config file, using defaults");
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking the env var first, then the
/// standard platform config directory).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("POSTBOX_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("postbox").join("config.toml"))
}

/// The log file path, alongside the platform cache directory.
pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("postbox")
        .join("postbox.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.base_dir.is_none());
    }

    #[test]
    fn serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.log_level, cfg.log_level);
        assert_eq!(parsed.date_display_format, cfg.date_display_format);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let partial = r#"log_level = "debug""#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.date_display_format, "%Y-%m-%d %H:%M".to_string());
    }
}
