//! Log setup for test binaries.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise the global tracing subscriber once.
///
/// Respects `RUST_LOG`; defaults to `donar=debug` so harness internals show
/// up in test output without drowning it in dependency noise. Safe to call
/// from every test.
pub fn init() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("donar=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
