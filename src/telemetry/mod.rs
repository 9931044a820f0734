//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use self::metrics::{
    init_metrics_exporter, record_frame, record_frame_sent, record_synthetic_update,
    set_active_flashes, set_tracked_symbols,
};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
///
/// The metrics exporter needs a tokio runtime to serve from.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics_exporter(port)?;
    }

    Ok(())
}
