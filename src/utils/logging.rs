use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;

fn parse_level(raw: &str) -> LevelFilter {
    match raw.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs the global logger. Safe to call more than once; later calls are
/// ignored.
pub fn init_logging() {
    let log_level = parse_level(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        match record.level() {
            Level::Info => writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args()),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                target,
                record.args()
            ),
        }
    });

    // Filter out noisy modules in production
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("sqlx", LevelFilter::Warn);
        builder.filter_module("wgpu_core", LevelFilter::Warn);
        builder.filter_module("iced_wgpu", LevelFilter::Warn);
        builder.filter_module("naga", LevelFilter::Warn);
    }

    let _ = builder.filter_level(log_level).target(Target::Stdout).try_init();
}

pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    log::error!("[{}] {}", context, error);

    let mut source = error.source();
    while let Some(err) = source {
        log::error!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_store_operation(operation: &str, documents: usize, duration_ms: u64) {
    log::debug!("[Store] {} touched {} document(s) in {}ms", operation, documents, duration_ms);
}

pub fn log_snapshot(documents: usize) {
    log::info!("[Feed] Snapshot applied with {} announcement(s)", documents);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_level("ERROR"), LevelFilter::Error);
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging();
        init_logging();
    }
}
