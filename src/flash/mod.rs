//! Flash and direction derivation
//!
//! Turns price deltas into transient Up/Down highlights that expire on their own.

mod deriver;
mod types;

pub use deriver::{FlashDeriver, DEFAULT_FLASH_DURATION};
pub use types::{FlashEntries, FlashState, PriceDirection};
