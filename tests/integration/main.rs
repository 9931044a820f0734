//! Integration tests for price-tracker

mod config_test;
mod feed_test;
mod tracker_test;

use price_tracker::store::RandomSource;

/// Always yields the same unit sample
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
