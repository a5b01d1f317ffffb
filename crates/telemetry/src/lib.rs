//! Logging bootstrap.
//!
//! Installs the global tracing subscriber according to settings. Idempotent:
//! a second call (or a concurrent first use) leaves the installed subscriber
//! in place.

use tracing_subscriber::EnvFilter;
use verso_kernel::settings::LogFormat;

/// Initialize the tracing pipeline. `RUST_LOG` overrides the default filter.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
    };

    // A subscriber may already be installed (repeat init, or a test harness).
    if installed.is_err() {
        tracing::debug!(target: "verso_telemetry", "subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_no_op() {
        init(LogFormat::Pretty);
        init(LogFormat::Json);
        init(LogFormat::Pretty);
    }
}
