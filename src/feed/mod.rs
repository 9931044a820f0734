//! Synthetic price feed
//!
//! Periodically random-walks every tracked symbol while toggled on.

mod scheduler;

pub use scheduler::{FeedScheduler, DEFAULT_FEED_PERIOD};
