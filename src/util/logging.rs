//! Structured logging setup
//!
//! Logs always go to stderr: stdout is reserved for the build plan when no
//! plan file is given. `RUST_LOG`, when set, takes precedence over the
//! configured level.
//!
//! # Example
//!
//! ```no_run
//! use dotnet_detect::config::DetectConfig;
//! use dotnet_detect::util::logging::{self, LoggingConfig};
//!
//! // DOTNET_DETECT_LOG_LEVEL and DOTNET_DETECT_LOG_JSON, plus any CLI overrides
//! let config = DetectConfig::default().with_overrides(None, Some("debug"));
//! logging::init_logging(LoggingConfig::from(&config));
//!
//! tracing::info!(root = "/workspace", "Starting detection");
//! ```

use crate::config::DetectConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,

    /// One JSON object per line instead of pretty text
    pub use_json: bool,

    /// Include the module target (e.g. dotnet_detect::detection)
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl From<&DetectConfig> for LoggingConfig {
    /// JSON lines carry source locations; pretty text does not.
    fn from(config: &DetectConfig) -> Self {
        Self {
            level: parse_level(&config.log_level),
            use_json: config.log_json,
            include_location: config.log_json,
            ..Default::default()
        }
    }
}

/// Parses a log level, case-insensitively. Unknown values fall back to INFO.
///
/// ```
/// use dotnet_detect::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("chatty"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    level_str.trim().parse().unwrap_or(Level::INFO)
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    EnvFilter::new(format!("dotnet_detect={}", level))
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);
        let layer = fmt::layer()
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}
