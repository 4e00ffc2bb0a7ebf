//! Logging setup for the binaries.
//!
//! Installs a global `tracing` subscriber writing to stderr so that stdout
//! stays reserved for reports. The library itself never installs one; it
//! only emits events through `TracingSink`.

use std::io::IsTerminal;
use std::sync::{Mutex, PoisonError};
use tracing_subscriber::{EnvFilter, Registry, filter::ParseError, fmt, prelude::*};

static INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The filter directives could not be parsed.
    #[error("Invalid log filter '{filter}': {source}")]
    Filter { filter: String, source: ParseError },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing with the given filter directives.
///
/// The filter is always parsed; once a subscriber is installed, later calls
/// (including ones racing the first) install nothing.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| LoggingError::Filter {
        filter: filter.to_string(),
        source,
    })?;

    let mut initialized = INITIALIZED.lock().unwrap_or_else(PoisonError::into_inner);
    if *initialized {
        return Ok(());
    }
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    *initialized = true;

    tracing::debug!(filter, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported_with_its_text() {
        let err = init("interpret_ext=notalevel").expect_err("bad directive");
        assert!(err.to_string().contains("interpret_ext=notalevel"));
    }

    #[test]
    fn concurrent_first_calls_all_succeed() {
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| init("warn"))).collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("init thread"))
                .collect()
        });
        assert!(results.iter().all(Result::is_ok), "{results:?}");
        assert!(init("debug").is_ok());
    }
}
