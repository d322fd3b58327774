//! Tracing setup for hosts embedding `sma-chart`.
//!
//! The pipeline only emits `tracing` events; installing a subscriber is left
//! to the host unless it opts into the `telemetry` feature.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (falling back to `info`).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
