use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for timebox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Timeout governor defaults
    #[serde(default)]
    pub governor: GovernorConfig,

    /// Debugger detection
    #[serde(default)]
    pub debugger: DebuggerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timeout governor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GovernorConfig {
    /// Timeout applied when a caller does not supply one, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: i64,
}

const fn default_timeout_ms() -> i64 {
    10_000
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
        }
    }
}

/// How the debugger probe decides whether a debugger is attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebuggerMode {
    /// Ask the operating system
    #[default]
    Auto,
    /// Always report attached
    Attached,
    /// Always report detached
    Detached,
}

impl std::str::FromStr for DebuggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "attached" => Ok(Self::Attached),
            "detached" => Ok(Self::Detached),
            other => Err(format!(
                "invalid debugger mode '{other}', expected auto, attached or detached"
            )),
        }
    }
}

/// Debugger detection configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DebuggerConfig {
    #[serde(default)]
    pub mode: DebuggerMode,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for JSON log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file logs
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
