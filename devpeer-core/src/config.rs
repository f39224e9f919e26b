//! Application configuration.
//!
//! Configuration is read from an optional TOML file and then overridden by
//! `DEVPEER_*` environment variables. Every section falls back to defaults,
//! so an empty or missing file yields a working configuration that talks to
//! a directory on `localhost:3000` and the public GitHub API.
//!
//! ```toml
//! [directory]
//! base_url = "http://192.168.1.252:3000"
//! use_demo_users = false
//!
//! [profile]
//! api_base_url = "https://api.github.com"
//! web_base_url = "https://github.com"
//!
//! [map]
//! region_delta = 0.25
//!
//! [logging]
//! level = "debug"
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use reqwest::Url;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Default address of the user directory backend.
pub const DEFAULT_DIRECTORY_URL: &str = "http://localhost:3000";
/// Default public profile API.
pub const DEFAULT_PROFILE_API_URL: &str = "https://api.github.com";
/// Default public profile site, used for profile pages and avatars.
pub const DEFAULT_PROFILE_WEB_URL: &str = "https://github.com";
/// User agent sent to the profile API, which rejects anonymous agents.
pub const DEFAULT_USER_AGENT: &str = concat!("devpeer-core/", env!("CARGO_PKG_VERSION"));
/// Latitude/longitude span of the initial map viewport.
pub const DEFAULT_REGION_DELTA: f64 = 0.25;

/// Error type for configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`DevPeerConfig`].
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A configured value is out of range or malformed.
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Wrapper for [`LevelFilter`] that deserializes from a lowercase string.
///
/// Unknown values fall back to `info` instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        Self(LevelFilter::Info)
    }
}

impl LogLevel {
    /// Parses a level name, defaulting to `info` for unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let level = match s.trim().to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        Self(level)
    }
}

impl FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Settings for the user directory backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Base URL of the directory, without a trailing slash.
    pub base_url: String,
    /// Serve the bundled demo community instead of calling the backend.
    pub use_demo_users: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTORY_URL.to_string(),
            use_demo_users: false,
        }
    }
}

/// Settings for the public profile service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// API used to check that a handle exists.
    pub api_base_url: String,
    /// Site hosting profile pages and avatar images.
    pub web_base_url: String,
    /// `User-Agent` header sent with lookups.
    pub user_agent: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_PROFILE_API_URL.to_string(),
            web_base_url: DEFAULT_PROFILE_WEB_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for the map viewport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude and longitude span of the initial region.
    pub region_delta: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            region_delta: DEFAULT_REGION_DELTA,
        }
    }
}

/// Logging settings, consumed by the platform wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level emitted.
    pub level: LogLevel,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DevPeerConfig {
    /// Directory backend settings.
    pub directory: DirectoryConfig,
    /// Profile service settings.
    pub profile: ProfileConfig,
    /// Map viewport settings.
    pub map: MapConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl DevPeerConfig {
    /// Loads configuration from `path` and applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            Self::from_toml_str(&contents).map_err(|e| ConfigError::Toml {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses configuration from a TOML string without env overrides.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the document does not match the schema.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies `DEVPEER_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DEVPEER_DIRECTORY_URL") {
            self.directory.base_url = url;
        }
        if let Some(flag) = lookup("DEVPEER_USE_DEMO_USERS") {
            self.directory.use_demo_users = matches!(
                flag.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(url) = lookup("DEVPEER_PROFILE_API_URL") {
            self.profile.api_base_url = url;
        }
        if let Some(url) = lookup("DEVPEER_PROFILE_WEB_URL") {
            self.profile.web_base_url = url;
        }
        if let Some(level) = lookup("DEVPEER_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&level);
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_http_url("directory.base_url", &self.directory.base_url)?;
        validate_http_url("profile.api_base_url", &self.profile.api_base_url)?;
        validate_http_url("profile.web_base_url", &self.profile.web_base_url)?;

        if self.profile.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "profile.user_agent",
                reason: "must not be empty".to_string(),
            });
        }

        let delta = self.map.region_delta;
        if !delta.is_finite() || delta <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "map.region_delta",
                reason: format!("must be a positive number, got {delta}"),
            });
        }

        Ok(())
    }
}

fn validate_http_url(field: &'static str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value).map_err(|e| ConfigError::Invalid {
        field,
        reason: format!("{value}: {e}"),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            field,
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_values() {
        let config = DevPeerConfig::default();

        assert_eq!(config.directory.base_url, DEFAULT_DIRECTORY_URL);
        assert!(!config.directory.use_demo_users);
        assert_eq!(config.profile.api_base_url, DEFAULT_PROFILE_API_URL);
        assert_eq!(config.profile.web_base_url, DEFAULT_PROFILE_WEB_URL);
        assert!(config.profile.user_agent.starts_with("devpeer-core/"));
        assert!((config.map.region_delta - 0.25).abs() < f64::EPSILON);
        assert_eq!(*config.logging.level, LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = DevPeerConfig::from_toml_str("").unwrap();
        assert_eq!(config, DevPeerConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = DevPeerConfig::from_toml_str(
            r#"
            [directory]
            base_url = "http://192.168.1.252:3000"

            [logging]
            level = "DEBUG"
            "#,
        )
        .unwrap();

        assert_eq!(config.directory.base_url, "http://192.168.1.252:3000");
        assert!(!config.directory.use_demo_users);
        assert_eq!(config.profile.api_base_url, DEFAULT_PROFILE_API_URL);
        assert_eq!(*config.logging.level, LevelFilter::Debug);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = DevPeerConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap();
        assert_eq!(*config.logging.level, LevelFilter::Info);
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(DevPeerConfig::from_toml_str("[directory\nbase_url = 1").is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DEVPEER_DIRECTORY_URL", "http://10.0.0.2:3000"),
            ("DEVPEER_USE_DEMO_USERS", "true"),
            ("DEVPEER_PROFILE_API_URL", "http://127.0.0.1:9000"),
            ("DEVPEER_LOG_LEVEL", "warn"),
        ]);

        let mut config = DevPeerConfig::default();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.directory.base_url, "http://10.0.0.2:3000");
        assert!(config.directory.use_demo_users);
        assert_eq!(config.profile.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.profile.web_base_url, DEFAULT_PROFILE_WEB_URL);
        assert_eq!(*config.logging.level, LevelFilter::Warn);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DevPeerConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[map]\nregion_delta = \"wide\"").unwrap();

        let err = DevPeerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn validate_rejects_non_http_directory() {
        let mut config = DevPeerConfig::default();
        config.directory.base_url = "ftp://example.com".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("directory.base_url"));
    }

    #[test]
    fn validate_rejects_unparseable_url() {
        let mut config = DevPeerConfig::default();
        config.profile.web_base_url = "not a url".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "profile.web_base_url",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_delta() {
        let mut config = DevPeerConfig::default();
        config.map.region_delta = 0.0;
        assert!(config.validate().is_err());

        config.map.region_delta = f64::NAN;
        assert!(config.validate().is_err());
    }
}
