//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.nafta/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::calculator::TripType;
use crate::data::RoutePolicy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NaftaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_trip_type: Option<TripType>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DataConfig {
    pub source: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
    pub symmetric_routes: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_SOURCE: &str = "data";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "nafta.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_source: String,
    pub fetch_timeout: Duration,
    pub route_policy: RoutePolicy,
    pub default_trip_type: TripType,
    pub log_file: String,
    pub log_level: log::LevelFilter,
    /// Warnings raised while resolving, for `log_notes`.
    pub notes: Vec<ConfigNote>,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_source: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
    pub symmetric_routes: bool,
    pub default_trip_type: Option<TripType>,
    pub verbose: bool,
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
// Loading
// ============================================================================

/// Returns the path to `~/.nafta/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".nafta").join("config.toml"))
}

/// A log line produced while reading or resolving config.
///
/// Config is read before the file logger exists, so these are held and
/// replayed with `log_notes` once it is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNote {
    pub level: log::Level,
    pub message: String,
}

impl ConfigNote {
    fn new(level: log::Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Emit held notes through the logger.
pub fn log_notes(notes: &[ConfigNote]) {
    for note in notes {
        log::log!(note.level, "{}", note.message);
    }
}

/// The parsed file plus what happened while reading it.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: NaftaConfig,
    pub notes: Vec<ConfigNote>,
}

/// Load config from `~/.nafta/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NaftaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_at(&path),
        None => Ok(LoadedConfig {
            config: NaftaConfig::default(),
            notes: vec![ConfigNote::new(
                log::Level::Warn,
                "Could not determine home directory, using default config",
            )],
        }),
    }
}

/// Load config from an explicit path, generating the default there if missing.
pub fn load_config_at(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let mut notes = Vec::new();

    if !path.exists() {
        notes.push(ConfigNote::new(
            log::Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        ));
        if let Err(e) = generate_default_config(path) {
            notes.push(ConfigNote::new(log::Level::Warn, e));
        }
        return Ok(LoadedConfig {
            config: NaftaConfig::default(),
            notes,
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NaftaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notes.push(ConfigNote::new(
        log::Level::Info,
        format!("Loaded config from {}", path.display()),
    ));
    notes.push(ConfigNote::new(
        log::Level::Debug,
        format!("Config: {:?}", config),
    ));
    Ok(LoadedConfig { config, notes })
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> Result<(), String> {
    let default_content = r#"# Nafta Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_trip_type = "one-way"      # "one-way" or "round-trip"
# log_file = "nafta.log"             # Or set NAFTA_LOG_FILE env var
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [data]
# source = "data"                    # Directory or base URL; or NAFTA_DATA_SOURCE
# fetch_timeout_secs = 10            # Or NAFTA_FETCH_TIMEOUT
# symmetric_routes = false           # Answer B→A with the cached A→B route
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {e}"))?;
    }
    fs::write(path, default_content).map_err(|e| format!("Failed to write default config: {e}"))
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NaftaConfig, cli: &CliOverrides) -> ResolvedConfig {
    let mut notes = Vec::new();

    // Data source: CLI → env → config → default
    let data_source = cli
        .data_source
        .clone()
        .or_else(|| std::env::var("NAFTA_DATA_SOURCE").ok())
        .or_else(|| config.data.source.clone())
        .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string());

    // Timeout: CLI → env → config → default
    let timeout_secs = cli
        .fetch_timeout_secs
        .or_else(|| {
            std::env::var("NAFTA_FETCH_TIMEOUT")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
        })
        .or(config.data.fetch_timeout_secs)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
    // A zero timeout would fail every fetch before it starts
    let timeout_secs = if timeout_secs == 0 {
        notes.push(ConfigNote::new(
            log::Level::Warn,
            format!("Fetch timeout of 0s is unusable, using {DEFAULT_FETCH_TIMEOUT_SECS}s"),
        ));
        DEFAULT_FETCH_TIMEOUT_SECS
    } else {
        timeout_secs
    };

    // The flag can only switch symmetry on
    let symmetric = cli.symmetric_routes || config.data.symmetric_routes.unwrap_or(false);
    let route_policy = if symmetric {
        RoutePolicy::Symmetric
    } else {
        RoutePolicy::Directional
    };

    // Log file: env → config → default
    let log_file = std::env::var("NAFTA_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        parse_level(
            config
                .general
                .log_level
                .as_deref()
                .unwrap_or(DEFAULT_LOG_LEVEL),
            &mut notes,
        )
    };

    ResolvedConfig {
        data_source,
        fetch_timeout: Duration::from_secs(timeout_secs),
        route_policy,
        default_trip_type: cli
            .default_trip_type
            .or(config.general.default_trip_type)
            .unwrap_or_default(),
        log_file,
        log_level,
        notes,
    }
}

fn parse_level(level: &str, notes: &mut Vec<ConfigNote>) -> log::LevelFilter {
    level.parse().unwrap_or_else(|_| {
        notes.push(ConfigNote::new(
            log::Level::Warn,
            format!("Unknown log level {:?}, falling back to info", level),
        ));
        log::LevelFilter::Info
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NaftaConfig::default();
        assert!(config.data.source.is_none());
        assert!(config.general.default_trip_type.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NaftaConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(
            resolved.fetch_timeout,
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
        );
        assert_eq!(resolved.route_policy, RoutePolicy::Directional);
        assert_eq!(resolved.default_trip_type, TripType::OneWay);
        assert_eq!(resolved.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NaftaConfig {
            general: GeneralConfig {
                default_trip_type: Some(TripType::RoundTrip),
                log_file: None,
                log_level: Some("warn".to_string()),
            },
            data: DataConfig {
                source: None,
                fetch_timeout_secs: Some(3),
                symmetric_routes: Some(true),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.default_trip_type, TripType::RoundTrip);
        assert_eq!(resolved.route_policy, RoutePolicy::Symmetric);
        assert_eq!(resolved.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = NaftaConfig {
            data: DataConfig {
                source: Some("/srv/data".to_string()),
                fetch_timeout_secs: Some(30),
                symmetric_routes: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            data_source: Some("https://example.com/data".to_string()),
            fetch_timeout_secs: Some(2),
            symmetric_routes: true,
            default_trip_type: Some(TripType::RoundTrip),
            verbose: true,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.data_source, "https://example.com/data");
        assert_eq!(resolved.fetch_timeout, Duration::from_secs(2));
        assert_eq!(resolved.route_policy, RoutePolicy::Symmetric);
        assert_eq!(resolved.default_trip_type, TripType::RoundTrip);
        assert_eq!(resolved.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let mut notes = Vec::new();
        assert_eq!(parse_level("chatty", &mut notes), log::LevelFilter::Info);
        assert_eq!(parse_level("debug", &mut notes), log::LevelFilter::Debug);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, log::Level::Warn);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_trip_type = "round-trip"
log_file = "/tmp/nafta.log"

[data]
source = "https://example.com/data"
fetch_timeout_secs = 5
symmetric_routes = false
"#;
        let config: NaftaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_trip_type, Some(TripType::RoundTrip));
        assert_eq!(config.general.log_file.as_deref(), Some("/tmp/nafta.log"));
        assert_eq!(
            config.data.source.as_deref(),
            Some("https://example.com/data")
        );
        assert_eq!(config.data.fetch_timeout_secs, Some(5));
        assert_eq!(config.data.symmetric_routes, Some(false));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[data]
fetch_timeout_secs = 1
"#;
        let config: NaftaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data.fetch_timeout_secs, Some(1));
        assert!(config.data.source.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let cli = CliOverrides {
            fetch_timeout_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve(&NaftaConfig::default(), &cli);
        assert_eq!(
            resolved.fetch_timeout,
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
        );
        assert!(
            resolved
                .notes
                .iter()
                .any(|n| n.level == log::Level::Warn && n.message.contains("0s"))
        );
    }

    #[test]
    fn test_resolve_without_problems_has_no_notes() {
        let resolved = resolve(&NaftaConfig::default(), &CliOverrides::default());
        assert!(resolved.notes.is_empty());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nafta-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_generated_and_noted() {
        let path = scratch_dir("config-generate").join("nested").join("config.toml");

        let loaded = load_config_at(&path).unwrap();
        assert!(path.exists());
        assert!(loaded.config.data.source.is_none());
        assert_eq!(loaded.notes.len(), 1);
        assert!(loaded.notes[0].message.contains("generating default"));

        // The generated file is all comments, so it reads back as defaults
        let reloaded = load_config_at(&path).unwrap();
        assert!(reloaded.config.data.fetch_timeout_secs.is_none());
        assert!(reloaded.notes[0].message.starts_with("Loaded config from"));
    }

    #[test]
    fn test_unwritable_default_config_is_noted() {
        let dir = scratch_dir("config-unwritable");
        // A regular file where the parent directory should be
        fs::write(dir.join("blocker"), "").unwrap();
        let path = dir.join("blocker").join("config.toml");

        let loaded = load_config_at(&path).unwrap();
        assert!(
            loaded
                .notes
                .iter()
                .any(|n| n.level == log::Level::Warn && n.message.contains("Failed to create"))
        );
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let path = scratch_dir("config-malformed").join("config.toml");
        fs::write(&path, "[data\nsource = ").unwrap();
        let err = load_config_at(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
