//! Tracing subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info,sentichat=debug";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Records emitted through the `log`
/// facade are forwarded into tracing as well. Calling this twice is harmless;
/// the second install is ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
