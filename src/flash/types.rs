//! Direction and flash types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Direction of the latest price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    None,
}

/// Transient highlight for a just-changed price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlashState {
    #[default]
    None,
    Up,
    Down,
}

impl FlashState {
    /// Flash raised by a move in `direction`, if any
    pub fn for_direction(direction: PriceDirection) -> Option<Self> {
        match direction {
            PriceDirection::Up => Some(FlashState::Up),
            PriceDirection::Down => Some(FlashState::Down),
            PriceDirection::None => None,
        }
    }
}

/// Immutable snapshot of the active flashes, keyed by symbol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashEntries(Arc<HashMap<String, FlashState>>);

impl FlashEntries {
    /// Active flash for `symbol`, `FlashState::None` when absent
    pub fn state(&self, symbol: &str) -> FlashState {
        self.0.get(symbol).copied().unwrap_or_default()
    }

    pub fn get(&self, symbol: &str) -> Option<FlashState> {
        self.0.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, symbol: &str, flash: FlashState) {
        Arc::make_mut(&mut self.0).insert(symbol.to_string(), flash);
    }

    /// Remove `symbol` only if its flash is still `expected`
    pub(crate) fn clear_if(&mut self, symbol: &str, expected: FlashState) -> bool {
        if self.get(symbol) != Some(expected) {
            return false;
        }
        Arc::make_mut(&mut self.0).remove(symbol);
        true
    }
}

impl FromIterator<(String, FlashState)> for FlashEntries {
    fn from_iter<I: IntoIterator<Item = (String, FlashState)>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}
