//! Structured logging bootstrap for applications embedding cgraph.
//!
//! The library only emits `tracing` events; hosts decide whether and how to
//! collect them by calling one of the initializers here once at startup.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format for the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human readable output with colors.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// Newline-delimited JSON records.
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "cgraph_graphs=debug")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to log span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> InitResult {
    let env_filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let file = config
        .file_path
        .as_deref()
        .map(|path| std::fs::OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    let layer = fmt::layer()
        .with_span_events(span_events)
        .with_target(config.include_targets);

    match (config.format, file) {
        (LogFormat::Json, Some(file)) => registry.with(layer.json().with_writer(file)).try_init()?,
        (LogFormat::Json, None) => registry.with(layer.json()).try_init()?,
        (LogFormat::Compact, Some(file)) => registry
            .with(layer.compact().with_ansi(false).with_writer(file))
            .try_init()?,
        (LogFormat::Compact, None) => registry.with(layer.compact()).try_init()?,
        (LogFormat::Pretty, Some(file)) => registry
            .with(layer.pretty().with_ansi(false).with_writer(file))
            .try_init()?,
        (LogFormat::Pretty, None) => registry.with(layer.pretty()).try_init()?,
    }

    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> InitResult {
    init_logging(LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level for the graph engine)
pub fn init_dev_logging() -> InitResult {
    init_logging(LoggingConfig {
        level: "info,cgraph_graphs=debug,cgraph_config=debug".to_string(),
        include_spans: true,
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }
}
