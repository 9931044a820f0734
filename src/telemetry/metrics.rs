//! Counters and gauges
//!
//! Recorded through the `metrics` facade; they are no-ops until a recorder
//! such as the Prometheus exporter is installed.

use std::net::SocketAddr;

pub const FRAMES_ACCEPTED: &str = "price_tracker_frames_accepted_total";
pub const FRAMES_REJECTED: &str = "price_tracker_frames_rejected_total";
pub const FRAMES_SENT: &str = "price_tracker_frames_sent_total";
pub const SYNTHETIC_UPDATES: &str = "price_tracker_synthetic_updates_total";
pub const ACTIVE_FLASHES: &str = "price_tracker_active_flashes";
pub const TRACKED_SYMBOLS: &str = "price_tracker_tracked_symbols";

/// Count one inbound frame
pub fn record_frame(accepted: bool) {
    if accepted {
        ::metrics::counter!(FRAMES_ACCEPTED).increment(1);
    } else {
        ::metrics::counter!(FRAMES_REJECTED).increment(1);
    }
}

/// Count one frame handed to the transport
pub fn record_frame_sent() {
    ::metrics::counter!(FRAMES_SENT).increment(1);
}

/// Count the symbols re-priced by one synthetic batch
pub fn record_synthetic_update(symbols: usize) {
    ::metrics::counter!(SYNTHETIC_UPDATES).increment(symbols as u64);
}

pub fn set_active_flashes(count: usize) {
    ::metrics::gauge!(ACTIVE_FLASHES).set(count as f64);
}

pub fn set_tracked_symbols(count: usize) {
    ::metrics::gauge!(TRACKED_SYMBOLS).set(count as f64);
}

/// Serve every metric over HTTP in Prometheus text format
pub fn init_metrics_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    ::metrics::describe_counter!(FRAMES_ACCEPTED, "Inbound frames merged into the price store");
    ::metrics::describe_counter!(FRAMES_REJECTED, "Malformed inbound frames dropped");
    ::metrics::describe_counter!(FRAMES_SENT, "Synthetic frames queued to the gateway");
    ::metrics::describe_counter!(SYNTHETIC_UPDATES, "Symbols re-priced by the synthetic feed");
    ::metrics::describe_gauge!(ACTIVE_FLASHES, "Symbols currently flashing");
    ::metrics::describe_gauge!(TRACKED_SYMBOLS, "Configured tracked symbols");

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}
