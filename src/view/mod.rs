//! Aggregated view
//!
//! Read-only combination of prices, connection status, feed flag and
//! flashes into one display-ready value.

mod publisher;
mod types;

pub use publisher::{ViewInputs, ViewPublisher};
pub use types::{build_view, PriceRow, TrackerView, PLACEHOLDER_PRICE};
