//! End-to-end tests through the tracker's public surface

use crate::FixedSource;
use price_tracker::clock::ManualClock;
use price_tracker::flash::{FlashState, PriceDirection};
use price_tracker::gateway::{ConnectionGateway, ConnectionStatus, LoopbackGateway};
use price_tracker::view::TrackerView;
use price_tracker::{PriceTracker, TrackerSettings};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn tracker(gateway: Arc<LoopbackGateway>, symbols: &[&str], sample: f64) -> PriceTracker {
    let settings = TrackerSettings::new(symbols.iter().map(|s| s.to_string()).collect());
    PriceTracker::new(
        settings,
        gateway,
        Box::new(FixedSource(sample)),
        Arc::new(ManualClock::new(1_700_000_000_000)),
    )
}

async fn wait_for(
    view: &mut watch::Receiver<TrackerView>,
    predicate: impl FnMut(&TrackerView) -> bool,
) -> TrackerView {
    tokio::time::timeout(Duration::from_millis(500), view.wait_for(predicate))
        .await
        .expect("timed out waiting for view")
        .expect("view closed")
        .clone()
}

#[tokio::test(start_paused = true)]
async fn test_flash_decays_after_one_second() {
    let gateway = Arc::new(LoopbackGateway::new(64));
    let tracker = tracker(gateway.clone(), &["AAPL", "GOOG"], 0.5);
    let mut view = tracker.view();
    tracker.connect();

    gateway.inject("GOOG|100.00");
    gateway.inject("GOOG|90.00");
    let current = wait_for(&mut view, |v| v.rows[0].flash == FlashState::Down).await;
    assert_eq!(current.rows[0].symbol, "GOOG");
    assert_eq!(current.rows[0].direction, PriceDirection::Down);
    assert_eq!(current.rows[1].symbol, "AAPL");
    assert!(current.rows[1].is_placeholder());

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(tracker.current_view().rows[0].flash, FlashState::Down);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let current = wait_for(&mut view, |v| v.rows[0].flash == FlashState::None).await;
    // Direction persists; only the flash expires
    assert_eq!(current.rows[0].direction, PriceDirection::Down);
}

#[tokio::test(start_paused = true)]
async fn test_rows_sorted_by_descending_price() {
    let gateway = Arc::new(LoopbackGateway::new(64));
    let tracker = tracker(gateway.clone(), &["AAPL", "GOOG", "MSFT", "TSLA"], 0.5);
    let mut view = tracker.view();
    tracker.connect();

    gateway.inject("MSFT|300.00");
    gateway.inject("AAPL|150.25");
    gateway.inject("GOOG|300.00");
    let current = wait_for(&mut view, |v| {
        v.rows.iter().filter(|r| !r.is_placeholder()).count() == 3
    })
    .await;

    let order: Vec<_> = current.rows.iter().map(|r| r.symbol.as_str()).collect();
    // Equal prices keep configured order; never-priced symbols go last
    assert_eq!(order, vec!["GOOG", "MSFT", "AAPL", "TSLA"]);
    assert_eq!(current.rows[2].price_text, "$150.25");
    assert_eq!(current.rows[3].price_text, "--");
}

#[tokio::test(start_paused = true)]
async fn test_echo_gateway_round_trips_synthetic_prices() {
    let gateway = Arc::new(LoopbackGateway::echo(64));
    let tracker = tracker(gateway.clone(), &["AAPL", "GOOG"], 0.5);
    let mut view = tracker.view();

    tracker.connect();
    tracker.toggle_feed();

    let current = wait_for(&mut view, |v| {
        v.feed_running
            && v.connection_status == ConnectionStatus::Connected
            && v.rows.iter().all(|r| r.price_text == "$275.00")
    })
    .await;
    assert_eq!(current.rows.len(), 2);
    assert_eq!(gateway.sent(), vec!["AAPL|275.00", "GOOG|275.00"]);

    tracker.shutdown();
    assert!(!tracker.is_feed_running());
    assert_eq!(
        *gateway.status().borrow(),
        ConnectionStatus::Disconnected
    );
}

#[tokio::test(start_paused = true)]
async fn test_frames_before_connect_are_ignored() {
    let gateway = Arc::new(LoopbackGateway::new(64));
    let tracker = tracker(gateway.clone(), &["AAPL"], 0.5);

    assert!(!gateway.inject("AAPL|1.00"));
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(tracker.store().snapshot().is_empty());
    assert!(tracker.current_view().rows[0].is_placeholder());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_tracker_closes_gateway() {
    let gateway = Arc::new(LoopbackGateway::new(64));
    let tracker = tracker(gateway.clone(), &["AAPL"], 0.5);
    tracker.connect();
    tracker.toggle_feed();
    assert!(gateway.is_connected());

    drop(tracker);
    assert!(!gateway.is_connected());

    let sent = gateway.sent().len();
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(gateway.sent().len(), sent);
}
