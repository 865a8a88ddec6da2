use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Maps `-v` occurrences to the default log level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Builds the filter from `RUST_LOG` text. The `-v` level only applies when
/// `rust_log` holds no directives.
pub fn env_filter(verbosity: u8, rust_log: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .parse_lossy(rust_log)
}

// Logs go to stderr so they never interleave with shell output.
pub fn init_logging(verbosity: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
        )
        .with(env_filter(verbosity, &rust_log))
        .init();
}
