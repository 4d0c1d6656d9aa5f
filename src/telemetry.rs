//! Opt-in `tracing` setup for hosts embedding `chart-layout`.
//!
//! Layout passes and legend/margin negotiation log at `debug`, hit tests at
//! `trace`, and collapsed plot areas at `warn`. Hosts that already install a
//! subscriber can ignore this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,chart_layout=info";

/// Installs a compact subscriber filtered by [`DEFAULT_FILTER`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Installs a compact `fmt` subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` takes precedence over `fallback_filter`. Returns `false` when the
/// feature is disabled or a global subscriber was already set.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
