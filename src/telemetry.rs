//! Telemetry helpers for applications embedding `rxn-coords`.
//!
//! Renderers emit `tracing` events under the `rxn_coords` target. Hosts can
//! call one of the helpers below or install their own subscriber.

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber already exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback("info")
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"rxn_coords=debug"`. `RUST_LOG` still takes precedence.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directive))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
