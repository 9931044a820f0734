//! `symbol|price` text frame codec

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Field separator on the wire
pub const FRAME_SEPARATOR: char = '|';

/// One price frame exchanged with the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFrame {
    pub symbol: String,
    pub price: Decimal,
}

impl PriceFrame {
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }

    /// Parse a raw frame, returning `None` for anything malformed
    ///
    /// A frame is malformed unless it has exactly two `|`-separated fields,
    /// a non-blank symbol, and a base-10 decimal price. Whitespace and control
    /// characters around the price are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut fields = raw.split(FRAME_SEPARATOR);
        let symbol = fields.next()?;
        let price = fields.next()?;
        if fields.next().is_some() || symbol.trim().is_empty() {
            return None;
        }

        // `Decimal::from_str` skips digit separators
        let price = price.trim_matches(|c: char| c <= ' ');
        if price.contains('_') {
            return None;
        }
        let price = Decimal::from_str(price).ok()?;
        Some(Self::new(symbol, price))
    }
}

impl fmt::Display for PriceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.symbol, FRAME_SEPARATOR, self.price)
    }
}
