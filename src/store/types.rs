//! Price store types

use crate::flash::PriceDirection;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Latest known price for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Ticker symbol, the stable key
    pub symbol: String,
    /// Current price at full precision
    pub price: Decimal,
    /// Price of the record this one replaced, `None` on first observation
    pub previous_price: Option<Decimal>,
    /// Milliseconds since the Unix epoch of the last mutation
    pub last_updated_millis: Option<i64>,
}

impl PriceRecord {
    /// Build the successor of `prior` (if any) at `price`
    pub fn next(
        symbol: impl Into<String>,
        price: Decimal,
        prior: Option<&PriceRecord>,
        now_millis: i64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            previous_price: prior.map(|p| p.price),
            last_updated_millis: Some(now_millis),
        }
    }

    /// Direction of the latest move relative to the previous price
    pub fn direction(&self) -> PriceDirection {
        match self.previous_price {
            Some(prev) if self.price > prev => PriceDirection::Up,
            Some(prev) if self.price < prev => PriceDirection::Down,
            _ => PriceDirection::None,
        }
    }

    /// Display text, e.g. `$200.00`
    pub fn price_text(&self) -> String {
        let cents = self
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${:.2}", cents)
    }
}

/// Immutable snapshot of every known symbol's record
///
/// Cloning is cheap; the map is shared and copied on write by the store only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceState(Arc<HashMap<String, PriceRecord>>);

impl PriceState {
    pub fn get(&self, symbol: &str) -> Option<&PriceRecord> {
        self.0.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.0.values()
    }

    /// Copy-on-write access for the owning store
    pub(crate) fn make_mut(&mut self) -> &mut HashMap<String, PriceRecord> {
        Arc::make_mut(&mut self.0)
    }
}

impl FromIterator<PriceRecord> for PriceState {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|r| (r.symbol.clone(), r)).collect(),
        ))
    }
}
