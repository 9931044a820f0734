//! price-tracker: live stock price tracker engine
//!
//! This library provides the core components for:
//! - A price store merging a synthetic random walk with inbound `symbol|price` frames
//! - Up/down flash derivation with self-expiring highlights
//! - A toggleable periodic synthetic feed
//! - An aggregated, sorted, change-suppressed view
//! - WebSocket and in-process connection gateways
//! - Logging and metrics

pub mod cli;
pub mod clock;
pub mod config;
pub mod feed;
pub mod flash;
pub mod gateway;
pub mod store;
pub mod telemetry;
pub mod tracker;
pub mod view;
pub mod ws;

pub use tracker::{PriceTracker, TrackerSettings};
