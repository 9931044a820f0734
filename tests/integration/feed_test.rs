//! Integration tests for the synthetic feed

use crate::FixedSource;
use price_tracker::clock::ManualClock;
use price_tracker::feed::FeedScheduler;
use price_tracker::gateway::{ConnectionGateway, LoopbackGateway};
use price_tracker::store::{PriceStore, RandomWalk};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

fn feed(sample: f64) -> (FeedScheduler, Arc<PriceStore>, Arc<LoopbackGateway>) {
    let gateway = Arc::new(LoopbackGateway::new(64));
    gateway.connect();
    let store = Arc::new(PriceStore::new(
        gateway.clone(),
        RandomWalk::default(),
        Box::new(FixedSource(sample)),
        Arc::new(ManualClock::new(0)),
    ));
    let symbols: Arc<[String]> = Arc::from(vec!["AAPL".to_string(), "GOOG".to_string()]);
    let scheduler = FeedScheduler::new(Arc::clone(&store), symbols, Duration::from_millis(2_000));
    (scheduler, store, gateway)
}

#[tokio::test(start_paused = true)]
async fn test_rising_walk_over_three_ticks() {
    let (scheduler, store, gateway) = feed(1.0);

    scheduler.toggle();
    tokio::time::sleep(Duration::from_millis(4_001)).await;

    // 500.00 → 510.00 → 520.20 → 530.60 (rounded to cents)
    let state = store.snapshot();
    let record = state.get("AAPL").unwrap();
    assert_eq!(record.price, dec!(530.60));
    assert_eq!(record.previous_price, Some(dec!(520.20)));
    assert_eq!(gateway.sent().len(), 6);
    assert!(gateway.sent().contains(&"GOOG|530.60".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_stopped_feed_sends_nothing_more() {
    let (scheduler, _store, gateway) = feed(0.5);

    scheduler.toggle();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(gateway.sent().len(), 2);

    scheduler.toggle();
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(gateway.sent().len(), 2);
    assert_eq!(gateway.sent()[0], "AAPL|275.00");
}

#[tokio::test(start_paused = true)]
async fn test_disconnected_gateway_still_updates_store() {
    let (scheduler, store, gateway) = feed(0.5);
    gateway.close();

    scheduler.toggle();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(store.snapshot().len(), 2);
    assert!(gateway.sent().is_empty());
}
