use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Target prefix shared by `bufser`, `bufser_channel` and `bufser_store`.
const CRATE_TARGET: &str = "bufser";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// `level` applies to the bufser crates. Everything else stays at warn, or
/// quieter when `level` is quieter.
fn log_targets(level: LogLevel) -> Targets {
    let level = LevelFilter::from(level);
    Targets::new()
        .with_default(level.min(LevelFilter::WARN))
        .with_target(CRATE_TARGET, level)
}

/// Install the stderr subscriber. Channel open/close/flush events are
/// logged at debug level, per-transfer events at trace level.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(matches!(level, LogLevel::Trace));
    let registry = tracing_subscriber::registry().with(log_targets(level));

    // A subscriber may already be set (tests); keep the existing one.
    let _ = match format {
        LogFormat::Text => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn crate_targets_follow_requested_level() {
        let targets = log_targets(LogLevel::Debug);
        assert!(targets.would_enable("bufser_channel::writer", &Level::DEBUG));
        assert!(targets.would_enable("bufser_store::store", &Level::DEBUG));
        assert!(!targets.would_enable("bufser_channel::reader", &Level::TRACE));
    }

    #[test]
    fn other_targets_capped_at_warn() {
        let verbose = log_targets(LogLevel::Trace);
        assert!(verbose.would_enable("clap_builder", &Level::WARN));
        assert!(!verbose.would_enable("clap_builder", &Level::INFO));

        let quiet = log_targets(LogLevel::Error);
        assert!(!quiet.would_enable("clap_builder", &Level::WARN));
        assert!(quiet.would_enable("bufser", &Level::ERROR));
    }
}
