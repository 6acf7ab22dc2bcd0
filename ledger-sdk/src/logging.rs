//! # Structured Logging
//!
//! The library crates only emit `tracing` events. Binaries and tests that
//! want to see them install a subscriber here; output goes to stderr.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// # Arguments
///
/// * `default_level` - The filter used when `RUST_LOG` is not set, e.g.
///   `"info"` or `"ledger_transaction=debug"`.
///
/// # Returns
///
/// `Err` if a global subscriber is already installed; the existing one is
/// left in place.
pub fn init_logging(default_level: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()?;

    tracing::debug!("logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        assert!(init_logging("debug").is_ok());
        assert!(init_logging("debug").is_err());
    }
}
