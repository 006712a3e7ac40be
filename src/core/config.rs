//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfarer/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The logger is configured from the resolved config, so anything worth
//! logging while loading is collected in [`ConfigNotes`] and replayed by
//! `main` once the logger is up.

use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfarerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripConfig {
    pub preferences: Option<String>,
    pub fetch_day_recommendations: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub booking_notice_ms: Option<u64>,
    pub chat_open: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BOOKING_NOTICE_MS: u64 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_LOG_FILE: &str = "wayfarer.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub preferences: Option<String>,
    pub fetch_day_recommendations: bool,
    pub booking_notice: Duration,
    pub chat_open: bool,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(
            &WayfarerConfig::default(),
            &CliOverrides::default(),
            |_| None,
            &mut ConfigNotes::default(),
        )
    }
}

/// Values taken from command-line flags. `None` / `false` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub fetch_days: bool,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Deferred Log Records
// ============================================================================

#[derive(Debug, Default)]
pub struct ConfigNotes(Vec<(Level, String)>);

impl ConfigNotes {
    fn push(&mut self, level: Level, message: String) {
        self.0.push((level, message));
    }

    /// Send every held record to the logger, oldest first.
    pub fn replay(self) {
        for (level, message) in self.0 {
            log::log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.wayfarer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfarer").join("config.toml"))
}

/// Load config from `~/.wayfarer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfarerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut ConfigNotes) -> Result<WayfarerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            notes.push(
                Level::Warn,
                "Could not determine home directory, using default config".to_string(),
            );
            return Ok(WayfarerConfig::default());
        }
    };
    load_config_from(&path, notes)
}

/// Load config from an explicit path. See [`load_config`].
pub fn load_config_from(
    path: &Path,
    notes: &mut ConfigNotes,
) -> Result<WayfarerConfig, ConfigError> {
    if !path.exists() {
        notes.push(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(path, notes);
        return Ok(WayfarerConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WayfarerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notes.push(Level::Info, format!("Loaded config from {}", path.display()));
    notes.push(Level::Debug, format!("Config: {config:?}"));
    Ok(config)
}

fn generate_default_config(path: &Path, notes: &mut ConfigNotes) {
    let default_content = r#"# Wayfarer Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"     # Or set WAYFARER_BASE_URL

# [trip]
# preferences = "nature, chill"          # Sent with every new plan
# fetch_day_recommendations = false      # Refetch when changing days

# [ui]
# booking_notice_ms = 3000               # How long booking confirmations stay up
# chat_open = false                      # Start with the chat panel open

# [log]
# level = "debug"                        # "error", "warn", "info", "debug", "trace", "off"
# file = "wayfarer.log"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        notes.push(Level::Warn, format!("Failed to create config directory: {e}"));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        notes.push(Level::Warn, format!("Failed to write default config: {e}"));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &WayfarerConfig,
    cli: &CliOverrides,
    notes: &mut ConfigNotes,
) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok(), notes)
}

/// [`resolve`] with an injectable environment lookup.
fn resolve_with(
    config: &WayfarerConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    notes: &mut ConfigNotes,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("WAYFARER_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Preferences: env → config
    let preferences = env("WAYFARER_PREFERENCES")
        .or_else(|| config.trip.preferences.clone())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let fetch_day_recommendations =
        cli.fetch_days || config.trip.fetch_day_recommendations.unwrap_or(false);

    let log_level = config
        .log
        .level
        .as_deref()
        .and_then(|level| match level.parse() {
            Ok(level) => Some(level),
            Err(_) => {
                notes.push(
                    Level::Warn,
                    format!("Unknown log level '{level}', using {DEFAULT_LOG_LEVEL}"),
                );
                None
            }
        })
        .unwrap_or(log::LevelFilter::Debug);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.log.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        base_url,
        preferences,
        fetch_day_recommendations,
        booking_notice: Duration::from_millis(
            config
                .ui
                .booking_notice_ms
                .unwrap_or(DEFAULT_BOOKING_NOTICE_MS),
        ),
        chat_open: config.ui.chat_open.unwrap_or(false),
        log_level,
        log_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(
            &WayfarerConfig::default(),
            &CliOverrides::default(),
            no_env,
            &mut ConfigNotes::default(),
        );
        assert_eq!(resolved.base_url, "http://localhost:8000");
        assert_eq!(resolved.booking_notice, Duration::from_secs(3));
        assert!(resolved.preferences.is_none());
        assert!(!resolved.fetch_day_recommendations);
        assert!(!resolved.chat_open);
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("wayfarer.log"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = WayfarerConfig {
            api: ApiConfig {
                base_url: Some("http://travel.internal:9000".to_string()),
            },
            trip: TripConfig {
                preferences: Some("nature".to_string()),
                fetch_day_recommendations: Some(true),
            },
            ui: UiConfig {
                booking_notice_ms: Some(1500),
                chat_open: Some(true),
            },
            log: LogConfig {
                level: Some("warn".to_string()),
                file: Some("/tmp/wf.log".to_string()),
            },
        };
        let mut notes = ConfigNotes::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env, &mut notes);
        assert_eq!(resolved.base_url, "http://travel.internal:9000");
        assert_eq!(resolved.preferences.as_deref(), Some("nature"));
        assert!(resolved.fetch_day_recommendations);
        assert_eq!(resolved.booking_notice, Duration::from_millis(1500));
        assert!(resolved.chat_open);
        assert_eq!(resolved.log_level, log::LevelFilter::Warn);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/wf.log"));
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = WayfarerConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "WAYFARER_BASE_URL" => Some("http://from-env".to_string()),
            "WAYFARER_PREFERENCES" => Some("  history  ".to_string()),
            _ => None,
        };

        let mut notes = ConfigNotes::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), env, &mut notes);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.preferences.as_deref(), Some("history"));

        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            fetch_days: true,
            log_file: None,
        };
        let resolved = resolve_with(&config, &cli, env, &mut notes);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert!(resolved.fetch_day_recommendations);
    }

    #[test]
    fn test_blank_preferences_are_dropped() {
        let config = WayfarerConfig {
            trip: TripConfig {
                preferences: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut notes = ConfigNotes::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env, &mut notes);
        assert!(resolved.preferences.is_none());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = WayfarerConfig {
            log: LogConfig {
                level: Some("chatty".to_string()),
                file: None,
            },
            ..Default::default()
        };
        let mut notes = ConfigNotes::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env, &mut notes);
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);
        assert_eq!(
            notes.0,
            vec![(
                Level::Warn,
                "Unknown log level 'chatty', using debug".to_string()
            )]
        );
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[api]
base_url = "http://localhost:8123"

[trip]
preferences = "family"
fetch_day_recommendations = true

[ui]
booking_notice_ms = 500
"#;
        let config: WayfarerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8123"));
        assert_eq!(config.trip.preferences.as_deref(), Some("family"));
        assert_eq!(config.trip.fetch_day_recommendations, Some(true));
        assert_eq!(config.ui.booking_notice_ms, Some(500));
        assert!(config.ui.chat_open.is_none());
        assert!(config.log.level.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("wayfarer-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let mut notes = ConfigNotes::default();
        let result = load_config_from(&path, &mut notes);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = std::env::temp_dir().join(format!("wayfarer-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs::remove_dir_all(&dir).ok();

        let mut notes = ConfigNotes::default();
        let config = load_config_from(&path, &mut notes).unwrap();
        assert!(config.api.base_url.is_none());
        assert_eq!(notes.0.len(), 1);
        assert_eq!(notes.0[0].0, Level::Info);
        assert!(notes.0[0].1.starts_with("No config file found"));

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Wayfarer Configuration"));
        // Everything is commented out, so it parses to defaults
        let reparsed: WayfarerConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.trip.preferences.is_none());

        fs::remove_dir_all(&dir).ok();
    }
}
