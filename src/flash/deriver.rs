//! Flash deriver with per-symbol decay timers

use super::{FlashEntries, FlashState};
use crate::store::PriceState;
use crate::telemetry;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default flash lifetime
pub const DEFAULT_FLASH_DURATION: Duration = Duration::from_millis(1_000);

/// Derives flash state from successive price snapshots
///
/// A symbol flashes when its record changes to a price above or below its
/// previous price. Each flash gets a decay timer; a newer flash for the same
/// symbol aborts the older timer, and a timer that fires anyway only clears
/// the entry if it still holds the tag it was scheduled for.
pub struct FlashDeriver {
    flashes: Arc<watch::Sender<FlashEntries>>,
    decay: Duration,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
    last_seen: Mutex<PriceState>,
    stopped: AtomicBool,
}

impl FlashDeriver {
    pub fn new(decay: Duration) -> Self {
        let (flashes, _) = watch::channel(FlashEntries::default());
        Self {
            flashes: Arc::new(flashes),
            decay,
            timers: Mutex::new(HashMap::new()),
            last_seen: Mutex::new(PriceState::default()),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn decay(&self) -> Duration {
        self.decay
    }

    /// Current flashes
    pub fn current(&self) -> FlashEntries {
        self.flashes.borrow().clone()
    }

    /// Receiver notified whenever a flash is raised or cleared
    pub fn subscribe(&self) -> watch::Receiver<FlashEntries> {
        self.flashes.subscribe()
    }

    /// Process one price snapshot
    ///
    /// Must be called from within a tokio runtime; decay timers are spawned.
    pub fn observe(&self, state: &PriceState) {
        let mut last_seen = self.last_seen.lock();

        for record in state.records() {
            if last_seen.get(&record.symbol) == Some(record) {
                continue;
            }
            if let Some(flash) = FlashState::for_direction(record.direction()) {
                self.raise(&record.symbol, flash);
            }
        }

        *last_seen = state.clone();
    }

    fn raise(&self, symbol: &str, flash: FlashState) {
        // Checked under the timers lock so `stop` cannot miss a new timer
        let mut timers = self.timers.lock();
        if self.stopped.load(Ordering::Acquire) {
            return;
        }

        self.flashes.send_modify(|entries| entries.insert(symbol, flash));
        tracing::debug!(symbol, ?flash, "Flash raised");

        let flashes = Arc::clone(&self.flashes);
        let decay = self.decay;
        let key = symbol.to_string();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(decay).await;
            let cleared = flashes.send_if_modified(|entries| entries.clear_if(&key, flash));
            if cleared {
                telemetry::set_active_flashes(flashes.borrow().len());
            }
        });

        if let Some(stale) = timers.insert(symbol.to_string(), timer) {
            stale.abort();
        }
        drop(timers);
        telemetry::set_active_flashes(self.flashes.borrow().len());
    }

    /// Feed every snapshot from `prices` into [`observe`](Self::observe)
    pub fn spawn(self: &Arc<Self>, mut prices: watch::Receiver<PriceState>) -> JoinHandle<()> {
        let deriver = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let state = prices.borrow_and_update().clone();
                deriver.observe(&state);
                if prices.changed().await.is_err() {
                    tracing::debug!("Price store dropped, stopping flash deriver");
                    break;
                }
            }
        })
    }

    /// Abort every pending decay timer
    pub fn cancel_timers(&self) {
        for (_, timer) in self.timers.lock().drain() {
            timer.abort();
        }
    }

    /// Cancel every timer and ignore all later snapshots
    pub fn stop(&self) {
        let mut timers = self.timers.lock();
        self.stopped.store(true, Ordering::Release);
        for (_, timer) in timers.drain() {
            timer.abort();
        }
    }

    /// Number of decay timers that have not yet completed
    pub fn pending_timers(&self) -> usize {
        self.timers
            .lock()
            .values()
            .filter(|timer| !timer.is_finished())
            .count()
    }
}

impl Drop for FlashDeriver {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
