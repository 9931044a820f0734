//! Display-ready view types

use crate::flash::{FlashEntries, FlashState, PriceDirection};
use crate::gateway::ConnectionStatus;
use crate::store::PriceState;
use serde::Serialize;

/// Text shown for a symbol that has never been priced
pub const PLACEHOLDER_PRICE: &str = "--";

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub symbol: String,
    pub price_text: String,
    pub direction: PriceDirection,
    pub flash: FlashState,
}

impl PriceRow {
    pub fn placeholder(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price_text: PLACEHOLDER_PRICE.to_string(),
            direction: PriceDirection::None,
            flash: FlashState::None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.price_text == PLACEHOLDER_PRICE
    }
}

/// Everything a renderer needs, in one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerView {
    pub connection_status: ConnectionStatus,
    pub feed_running: bool,
    pub rows: Vec<PriceRow>,
}

impl TrackerView {
    /// View before any input has arrived: disconnected, stopped, all placeholders
    pub fn initial(symbols: &[String]) -> Self {
        Self {
            connection_status: ConnectionStatus::Disconnected,
            feed_running: false,
            rows: symbols.iter().map(PriceRow::placeholder).collect(),
        }
    }

    pub fn row(&self, symbol: &str) -> Option<&PriceRow> {
        self.rows.iter().find(|row| row.symbol == symbol)
    }
}

/// Combine the four inputs into one view
///
/// Tracked symbols with a price come first, highest price first (ties keep
/// configured order); never-priced symbols follow as placeholders in
/// configured order. Prices for untracked symbols are not shown.
pub fn build_view(
    symbols: &[String],
    prices: &PriceState,
    connection_status: ConnectionStatus,
    feed_running: bool,
    flashes: &FlashEntries,
) -> TrackerView {
    let mut priced: Vec<_> = symbols
        .iter()
        .filter_map(|symbol| prices.get(symbol))
        .collect();
    // Stable sort keeps configured order between equal prices
    priced.sort_by(|a, b| b.price.cmp(&a.price));

    let priced_rows = priced.into_iter().map(|record| PriceRow {
        symbol: record.symbol.clone(),
        price_text: record.price_text(),
        direction: record.direction(),
        flash: flashes.state(&record.symbol),
    });

    let placeholder_rows = symbols
        .iter()
        .filter(|symbol| !prices.contains(symbol))
        .map(PriceRow::placeholder);

    TrackerView {
        connection_status,
        feed_running,
        rows: priced_rows.chain(placeholder_rows).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PriceRecord;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn record(symbol: &str, price: Decimal, previous: Option<Decimal>) -> PriceRecord {
        PriceRecord {
            symbol: symbol.to_string(),
            price,
            previous_price: previous,
            last_updated_millis: Some(0),
        }
    }

    #[test]
    fn test_initial_view_is_all_placeholders() {
        let tracked = symbols(&["AAPL", "GOOG"]);
        let view = TrackerView::initial(&tracked);

        assert_eq!(view.connection_status, ConnectionStatus::Disconnected);
        assert!(!view.feed_running);
        assert_eq!(view.rows.len(), 2);
        for row in &view.rows {
            assert_eq!(row.price_text, "--");
            assert_eq!(row.direction, PriceDirection::None);
            assert_eq!(row.flash, FlashState::None);
        }
    }

    #[test]
    fn test_empty_state_matches_initial_rows() {
        let tracked = symbols(&["AAPL", "GOOG"]);
        let view = build_view(
            &tracked,
            &PriceState::default(),
            ConnectionStatus::Disconnected,
            false,
            &FlashEntries::default(),
        );
        assert_eq!(view, TrackerView::initial(&tracked));
    }

    #[test]
    fn test_priced_rows_sorted_descending_then_placeholders() {
        let tracked = symbols(&["AAPL", "GOOG", "MSFT", "NVDA"]);
        let prices: PriceState = vec![
            record("AAPL", dec!(150), None),
            record("MSFT", dec!(410.5), Some(dec!(400))),
        ]
        .into_iter()
        .collect();
        let flashes: FlashEntries = [("MSFT".to_string(), FlashState::Up)].into_iter().collect();

        let view = build_view(&tracked, &prices, ConnectionStatus::Connected, true, &flashes);

        let order: Vec<_> = view.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["MSFT", "AAPL", "GOOG", "NVDA"]);

        let msft = view.row("MSFT").unwrap();
        assert_eq!(msft.price_text, "$410.50");
        assert_eq!(msft.direction, PriceDirection::Up);
        assert_eq!(msft.flash, FlashState::Up);

        let aapl = view.row("AAPL").unwrap();
        assert_eq!(aapl.direction, PriceDirection::None);
        assert_eq!(aapl.flash, FlashState::None);

        assert!(view.row("GOOG").unwrap().is_placeholder());
        assert_eq!(view.connection_status, ConnectionStatus::Connected);
        assert!(view.feed_running);
    }

    #[test]
    fn test_equal_prices_keep_configured_order() {
        let tracked = symbols(&["B", "A", "C"]);
        let prices: PriceState = vec![
            record("A", dec!(10), None),
            record("B", dec!(10.00), None),
            record("C", dec!(10.0), None),
        ]
        .into_iter()
        .collect();

        let view = build_view(
            &tracked,
            &prices,
            ConnectionStatus::Connected,
            false,
            &FlashEntries::default(),
        );

        let order: Vec<_> = view.rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_untracked_symbols_are_not_rendered() {
        let tracked = symbols(&["AAPL"]);
        let prices: PriceState = vec![record("ZZZ", dec!(999), None)].into_iter().collect();

        let view = build_view(
            &tracked,
            &prices,
            ConnectionStatus::Connected,
            false,
            &FlashEntries::default(),
        );

        assert_eq!(view.rows, vec![PriceRow::placeholder("AAPL")]);
    }
}
