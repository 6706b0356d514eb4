//! Optional tracing subscriber for hosts and tests.

use tracing_subscriber::EnvFilter;

/// Env var that enables logging; its value is the fallback filter directive.
pub const LOG_ENV_VAR: &str = "COMMANDLIB_LOG";

/// Initialize a fmt subscriber for hosts without their own.
///
/// Logging is disabled unless `COMMANDLIB_LOG` is set. `RUST_LOG` wins over
/// its value when both are present. Returns whether a subscriber was
/// installed; an already-installed global subscriber is left alone.
pub fn init_tracing() -> bool {
    let Ok(directive) = std::env::var(LOG_ENV_VAR) else {
        return false;
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init()
        .is_ok()
}
