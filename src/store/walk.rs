//! Bounded random walk for synthetic prices

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Pluggable source of uniform samples in `[0, 1)`
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible sequence for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Random walk parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWalk {
    /// Lower bound for a never-seen symbol's starting price
    pub min_initial: Decimal,
    /// Upper bound for a never-seen symbol's starting price
    pub max_initial: Decimal,
    /// Largest step as a fraction of the previous price (0.02 = 2%)
    pub max_step: Decimal,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            min_initial: dec!(50.00),
            max_initial: dec!(500.00),
            max_step: dec!(0.02),
        }
    }
}

impl RandomWalk {
    /// Starting price for a symbol with no history, rounded to cents
    pub fn initial_price(&self, random: &mut dyn RandomSource) -> Decimal {
        let span = self.max_initial - self.min_initial;
        round_cents(self.min_initial + span * unit(random))
    }

    /// Next price from `previous`, moved by a uniform step in `[-max_step, +max_step]`
    ///
    /// Returns `previous` unchanged if the move would overflow.
    pub fn step(&self, previous: Decimal, random: &mut dyn RandomSource) -> Decimal {
        let change = -self.max_step + self.max_step * dec!(2) * unit(random);
        previous
            .checked_mul(Decimal::ONE + change)
            .map(round_cents)
            .unwrap_or(previous)
    }
}

fn unit(random: &mut dyn RandomSource) -> Decimal {
    let sample = random.next_unit().clamp(0.0, 1.0);
    Decimal::from_f64(sample).unwrap_or(Decimal::ZERO)
}

fn round_cents(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
