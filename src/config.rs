//! Configuration system for the family router
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (FAMILY_ROUTER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main router configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging configuration
    pub logging: LoggingSettings,

    /// Navigation host behaviour
    pub host: HostSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Optional log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Use JSON format for logs
    pub json_format: bool,
}

/// Navigation host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// What to do with snapshots whose collaborators disagree
    pub consistency: ConsistencyPolicy,

    /// Also report hold/unchanged events, not just navigations
    pub report_idle: bool,

    /// Output format for `replay` and `follow`
    pub output: OutputFormat,
}

// ─────────────────────────────────────────────────────────────────
// Enumerated settings
// ─────────────────────────────────────────────────────────────────

/// Policy for snapshots that fail [`AuthState::consistency_issues`](crate::types::AuthState::consistency_issues).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyPolicy {
    /// Apply silently
    Ignore,
    /// Apply and log a warning per issue
    Warn,
    /// Refuse the snapshot
    Reject,
}

impl FromStr for ConsistencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(ConsistencyPolicy::Ignore),
            "warn" => Ok(ConsistencyPolicy::Warn),
            "reject" => Ok(ConsistencyPolicy::Reject),
            _ => Err(format!(
                "Unknown consistency policy '{}'. Valid: ignore, warn, reject",
                s
            )),
        }
    }
}

/// Event output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format '{}'. Valid: text, json", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

// Default implementations

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            consistency: ConsistencyPolicy::Warn,
            report_idle: false,
            output: OutputFormat::Text,
        }
    }
}

impl RouterConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e.message()),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides()?;

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from("family-router.toml"),
            dirs::config_dir()
                .map(|p| p.join("family-router").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".family-router").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/family-router/config.toml"),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // Logging settings
        if let Ok(val) = std::env::var("FAMILY_ROUTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("FAMILY_ROUTER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("FAMILY_ROUTER_LOG_JSON") {
            self.logging.json_format = parse_flag(&val);
        }

        // Host settings
        if let Ok(val) = std::env::var("FAMILY_ROUTER_CONSISTENCY") {
            self.host.consistency = val
                .parse()
                .map_err(|e: String| Error::config_field_invalid("host.consistency", e))?;
        }
        if let Ok(val) = std::env::var("FAMILY_ROUTER_REPORT_IDLE") {
            self.host.report_idle = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("FAMILY_ROUTER_OUTPUT") {
            self.host.output = val
                .parse()
                .map_err(|e: String| Error::config_field_invalid("host.output", e))?;
        }

        Ok(())
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        if self.logging.file.is_some() && self.logging.max_files == 0 {
            return Err(Error::config_field_invalid(
                "logging.max_files",
                "max_files must be at least 1 when file logging is enabled",
            ));
        }

        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".family-router")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Family Router Configuration

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.family-router/logs/router.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false

[host]
# Snapshots whose profile/session/family disagree: ignore, warn, reject
consistency = "warn"

# Report hold and unchanged events as well as navigations
report_idle = false

# Event output format: text, json
output = "text"
"#
    .to_string()
}
