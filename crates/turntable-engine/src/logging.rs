//! Tracing subscriber setup.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Human-readable lines on stderr, plus the file when a directory is set.
    Stderr,
    /// File only. Used while the terminal is owned by the TUI.
    FileOnly,
}

/// File name prefix inside the log directory.
pub const LOG_FILE_NAME: &str = "turntable.log";

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("turntable=debug,turntable_engine=debug,turntable_tui=debug,warn")
    } else {
        EnvFilter::new("turntable=info,turntable_engine=info,turntable_tui=info,warn")
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `verbose`. With [`LogTarget::FileOnly`]
/// and no `log_dir`, logging stays disabled.
pub fn init_logging(log_dir: Option<&Path>, target: LogTarget, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        // The guard flushes on drop; logging lives for the whole process.
        std::mem::forget(guard);
        fmt::layer().with_writer(non_blocking).with_ansi(false)
    });

    // File layer first: both targets build on the same base.
    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let result = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogTarget::FileOnly => registry.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}
