//! Logging configuration and initialization.
//!
//! The engine is embedded in a host process, so installing a subscriber is
//! opt-in and never panics: a second initialization, or one racing a host
//! subscriber, is reported rather than treated as fatal.
//! - Presets (production, verbose, debug, trace, quiet)
//! - Per-target level overrides ("monitor=debug")
//! - JSON output format
//! - `RUST_LOG` takes precedence when set

use std::collections::HashMap;

use mindtype_core::EngineError;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(EngineError::Settings(format!(
                "Invalid log format: '{}'. Use 'text' or 'json'.",
                s
            ))),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Warnings, plus config changes at info
    #[default]
    Production,
    /// Operational detail without per-event noise
    Verbose,
    /// State transitions and dropped events
    Debug,
    /// Everything, including per-call band and fragment output
    Trace,
    /// Errors only
    Quiet,
}

impl std::str::FromStr for LogPreset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "production" => Ok(LogPreset::Production),
            "verbose" => Ok(LogPreset::Verbose),
            "debug" => Ok(LogPreset::Debug),
            "trace" => Ok(LogPreset::Trace),
            "quiet" => Ok(LogPreset::Quiet),
            _ => Err(EngineError::Settings(format!("Invalid log preset: '{}'", s))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target level overrides (e.g., "mindtype::monitor::state" -> DEBUG)
    pub overrides: HashMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn new(preset: LogPreset, format: LogFormat) -> Self {
        Self {
            preset,
            overrides: HashMap::new(),
            format,
        }
    }

    /// Add overrides of the form "target=level", comma separated.
    ///
    /// Short targets are expanded under `mindtype::`. Entries with an unknown
    /// level are skipped.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in overrides {
            for part in entry.as_ref().split(',') {
                let Some((target, level_str)) = part.split_once('=') else {
                    continue;
                };
                let target = target.trim();
                if target.is_empty() {
                    continue;
                }

                let full_target = if target == "mindtype" || target.starts_with("mindtype::") {
                    target.to_string()
                } else {
                    format!("mindtype::{}", target)
                };

                if let Some(level) = parse_level(level_str.trim()) {
                    self.overrides.insert(full_target, level);
                }
            }
        }
        self
    }

    fn directives(&self) -> Vec<String> {
        let mut directives: Vec<String> = match self.preset {
            LogPreset::Production => vec![
                "mindtype=warn".into(),
                "mindtype::config=info".into(),
            ],
            LogPreset::Verbose => vec![
                "mindtype=info".into(),
                "mindtype::monitor::state=info".into(),
            ],
            LogPreset::Debug => vec![
                "mindtype=debug".into(),
                "mindtype::band=info".into(),
                "mindtype::fragment=info".into(),
            ],
            LogPreset::Trace => vec!["mindtype=trace".into()],
            LogPreset::Quiet => vec!["mindtype=error".into()],
        };

        // Sorted so the filter string is stable.
        let mut overrides: Vec<_> = self.overrides.iter().collect();
        overrides.sort_by(|a, b| a.0.cmp(b.0));
        for (target, level) in overrides {
            directives.push(format!("{}={}", target, level_to_str(*level)));
        }
        directives
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let filter_str = self.directives().join(",");
        EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("mindtype=warn"))
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Install a global subscriber for this configuration.
///
/// Returns false if a subscriber was already installed.
pub fn init(config: &LogConfig) -> bool {
    let filter = config.build_filter();

    let result = match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };

    match result {
        Ok(()) => {
            tracing::info!(
                target: "mindtype::ffi",
                "Logging initialized: preset={:?}, format={:?}",
                config.preset, config.format
            );
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("invalid".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_preset_from_str() {
        assert_eq!("debug".parse::<LogPreset>().unwrap(), LogPreset::Debug);
        assert_eq!(" Quiet ".parse::<LogPreset>().unwrap(), LogPreset::Quiet);
        assert_eq!("".parse::<LogPreset>().unwrap(), LogPreset::Production);
        assert!(matches!(
            "loud".parse::<LogPreset>(),
            Err(EngineError::Settings(_))
        ));
    }

    #[test]
    fn test_overrides_expand_short_targets() {
        let config = LogConfig::default().with_overrides(["monitor=debug", "band=trace"]);
        assert_eq!(
            config.overrides.get("mindtype::monitor"),
            Some(&Level::DEBUG)
        );
        assert_eq!(config.overrides.get("mindtype::band"), Some(&Level::TRACE));
    }

    #[test]
    fn test_overrides_keep_full_targets() {
        let config = LogConfig::default().with_overrides(["mindtype::monitor::state=info"]);
        assert_eq!(
            config.overrides.get("mindtype::monitor::state"),
            Some(&Level::INFO)
        );
    }

    #[test]
    fn test_overrides_comma_separated() {
        let config = LogConfig::default().with_overrides(["monitor=debug,config=warn"]);
        assert_eq!(config.overrides.len(), 2);
        assert_eq!(config.overrides.get("mindtype::config"), Some(&Level::WARN));
    }

    #[test]
    fn test_invalid_override_skipped() {
        let config = LogConfig::default().with_overrides(["monitor=loud", "noequals", "=debug"]);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_overrides_appended_after_preset() {
        let config = LogConfig::new(LogPreset::Quiet, LogFormat::Text)
            .with_overrides(["fragment=trace"]);
        let directives = config.directives();
        assert_eq!(directives.first().map(String::as_str), Some("mindtype=error"));
        assert_eq!(
            directives.last().map(String::as_str),
            Some("mindtype::fragment=trace")
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level("warning"), Some(Level::WARN));
        assert_eq!(parse_level("nope"), None);
    }
}
