//! Price tracker composition
//!
//! Wires the store, flash deriver, feed scheduler and view publisher around
//! one connection gateway, and owns their background tasks.

use crate::clock::Clock;
use crate::config::Config;
use crate::feed::{FeedScheduler, DEFAULT_FEED_PERIOD};
use crate::flash::{FlashDeriver, FlashEntries, DEFAULT_FLASH_DURATION};
use crate::gateway::ConnectionGateway;
use crate::store::{PriceStore, RandomSource, RandomWalk};
use crate::telemetry;
use crate::view::{TrackerView, ViewInputs, ViewPublisher};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Engine settings independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub symbols: Vec<String>,
    pub feed_period: Duration,
    pub flash_duration: Duration,
    pub walk: RandomWalk,
}

impl TrackerSettings {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            feed_period: DEFAULT_FEED_PERIOD,
            flash_duration: DEFAULT_FLASH_DURATION,
            walk: RandomWalk::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            symbols: config.tracker.symbols.clone(),
            feed_period: config.tracker.feed_period(),
            flash_duration: config.tracker.flash_duration(),
            walk: config.walk.random_walk(),
        }
    }
}

/// Live price tracker
///
/// Construction spawns the inbound pump, the flash deriver and the view
/// publisher, so it needs an ambient tokio runtime. Dropping the tracker
/// shuts everything down.
pub struct PriceTracker {
    symbols: Arc<[String]>,
    gateway: Arc<dyn ConnectionGateway>,
    store: Arc<PriceStore>,
    deriver: Arc<FlashDeriver>,
    feed: FeedScheduler,
    view: Arc<ViewPublisher>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PriceTracker {
    pub fn new(
        settings: TrackerSettings,
        gateway: Arc<dyn ConnectionGateway>,
        random: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let symbols: Arc<[String]> = Arc::from(settings.symbols);
        telemetry::set_tracked_symbols(symbols.len());

        let store = Arc::new(PriceStore::new(
            Arc::clone(&gateway),
            settings.walk,
            random,
            clock,
        ));
        let deriver = Arc::new(FlashDeriver::new(settings.flash_duration));
        let feed = FeedScheduler::new(Arc::clone(&store), Arc::clone(&symbols), settings.feed_period);
        let view = Arc::new(ViewPublisher::new(&symbols));

        let inputs = ViewInputs {
            prices: store.subscribe(),
            status: gateway.status(),
            running: feed.subscribe(),
            flashes: deriver.subscribe(),
        };
        let tasks = vec![
            store.spawn_inbound(gateway.frames()),
            deriver.spawn(store.subscribe()),
            view.spawn(Arc::clone(&symbols), inputs),
        ];

        tracing::info!(
            symbols = symbols.len(),
            feed_period_ms = settings.feed_period.as_millis() as u64,
            flash_ms = settings.flash_duration.as_millis() as u64,
            "Price tracker started"
        );

        Self {
            symbols,
            gateway,
            store,
            deriver,
            feed,
            view,
            tasks: Mutex::new(tasks),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn connect(&self) {
        self.gateway.connect();
    }

    pub fn close(&self) {
        self.gateway.close();
    }

    /// Start the synthetic feed if stopped, stop it if running
    pub fn toggle_feed(&self) {
        self.feed.toggle();
    }

    pub fn is_feed_running(&self) -> bool {
        self.feed.is_running()
    }

    /// Receiver for every distinct view
    pub fn view(&self) -> watch::Receiver<TrackerView> {
        self.view.subscribe()
    }

    pub fn current_view(&self) -> TrackerView {
        self.view.current()
    }

    pub fn store(&self) -> &Arc<PriceStore> {
        &self.store
    }

    pub fn flashes(&self) -> FlashEntries {
        self.deriver.current()
    }

    /// Stop the feed, cancel timers and background tasks, and close the gateway
    ///
    /// Idempotent.
    pub fn shutdown(&self) {
        self.feed.stop();

        let tasks: Vec<_> = self.tasks.lock().drain(..).collect();
        for task in &tasks {
            task.abort();
        }
        // An aborted deriver may still be inside `observe` on another worker
        self.deriver.stop();

        if tasks.is_empty() {
            return;
        }
        self.gateway.close();
        tracing::info!("Price tracker stopped");
    }
}

impl Drop for PriceTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
