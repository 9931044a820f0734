//! Periodic synthetic price generation

use crate::store::PriceStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default time between synthetic batches
pub const DEFAULT_FEED_PERIOD: Duration = Duration::from_millis(2_000);

/// Drives [`PriceStore::generate_synthetic_update`] while running
///
/// Stopped → toggle → Running → toggle → Stopped. Starting ticks once
/// immediately and then every period. Stopping aborts the loop task; a tick
/// never awaits, so it is either fully applied or never started.
pub struct FeedScheduler {
    store: Arc<PriceStore>,
    symbols: Arc<[String]>,
    period: Duration,
    running: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FeedScheduler {
    pub fn new(store: Arc<PriceStore>, symbols: Arc<[String]>, period: Duration) -> Self {
        let (running, _) = watch::channel(false);
        Self {
            store,
            symbols,
            period,
            running,
            task: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    /// Receiver for the running flag
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }

    /// Flip the running flag, starting or cancelling the loop
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle(&self) {
        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        let now_running = !*self.running.borrow();
        self.running.send_replace(now_running);

        if now_running {
            *task = Some(self.spawn_loop());
            tracing::info!(period_ms = self.period.as_millis() as u64, "Price feed started");
        } else {
            tracing::info!("Price feed stopped");
        }
    }

    /// Stop the loop if it is running
    pub fn stop(&self) {
        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
        }
        if self.is_running() {
            self.running.send_replace(false);
            tracing::info!("Price feed stopped");
        }
    }

    fn spawn_loop(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let symbols = Arc::clone(&self.symbols);
        let running = self.running.subscribe();
        let period = self.period;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if !*running.borrow() {
                    break;
                }
                store.generate_synthetic_update(&symbols);
            }
        })
    }
}

impl Drop for FeedScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}
