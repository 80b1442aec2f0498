//! Tracing subscriber bootstrap.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedding binary's choice. This helper wires the conventional
//! fmt subscriber with an `RUST_LOG`-style filter for the CLI and tests.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// The filter comes from the `RUST_LOG` environment variable, falling back
/// to `default_filter` when unset or unparsable. Fails if a global
/// subscriber is already installed.
pub fn try_init(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_init_fails_cleanly() {
        // First install may race with other tests; only the second outcome
        // is deterministic
        let _ = try_init("info");
        assert!(try_init("info").is_err());
    }
}
