//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize console logging filtered by `RUST_LOG` (default `info`).
///
/// Only the first call in a process installs a subscriber; later calls are no-ops.
///
/// # Example
/// ```
/// use qolab_telemetry::init_telemetry;
/// init_telemetry("qolab").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;
    install(service_name, filter);
    Ok(())
}

/// Initialize console logging with an explicit filter directive, ignoring `RUST_LOG`.
///
/// # Example
/// ```
/// use qolab_telemetry::init_with_filter;
/// init_with_filter("qolab", "qolab_eval=debug,warn").expect("Failed to initialize telemetry");
/// ```
pub fn init_with_filter(
    service_name: &str,
    directives: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(directives)?;
    install(service_name, filter);
    Ok(())
}

fn install(service_name: &str, filter: EnvFilter) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();

        if installed.is_ok() {
            tracing::info!(service.name = service_name, "Telemetry initialized");
        }
    });
}
