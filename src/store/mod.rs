//! Price store
//!
//! Single owner of the symbol → price map. The map lives in a `watch`
//! channel: every mutation builds the next snapshot under the channel's
//! write lock and publishes it whole, so readers only ever see complete
//! states.

mod frame;
mod types;
mod walk;

pub use frame::{PriceFrame, FRAME_SEPARATOR};
pub use types::{PriceRecord, PriceState};
pub use walk::{RandomSource, RandomWalk, RngSource};

use crate::clock::Clock;
use crate::gateway::ConnectionGateway;
use crate::telemetry;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Authoritative price state fed by synthetic generation and inbound frames
pub struct PriceStore {
    state: watch::Sender<PriceState>,
    gateway: Arc<dyn ConnectionGateway>,
    walk: RandomWalk,
    random: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
}

impl PriceStore {
    pub fn new(
        gateway: Arc<dyn ConnectionGateway>,
        walk: RandomWalk,
        random: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(PriceState::default());
        Self {
            state,
            gateway,
            walk,
            random: Mutex::new(random),
            clock,
        }
    }

    /// Random-walk every symbol in `symbols` and publish the batch as one snapshot
    ///
    /// Each new price is also sent to the gateway as a `symbol|price` frame.
    /// A never-seen symbol starts from a random seed price and has no
    /// previous price on its first record. The seed is not reported as a
    /// previous price, so a symbol's first synthetic tick never shows a
    /// direction or flash.
    pub fn generate_synthetic_update(&self, symbols: &[String]) {
        if symbols.is_empty() {
            return;
        }

        let now = self.clock.now_millis();
        let mut frames = Vec::with_capacity(symbols.len());

        self.state.send_modify(|state| {
            let mut random = self.random.lock();
            let records = state.make_mut();

            for symbol in symbols {
                let prior = records.get(symbol);
                let origin = match prior {
                    Some(record) => record.price,
                    None => self.walk.initial_price(&mut **random),
                };
                let price = self.walk.step(origin, &mut **random);
                let record = PriceRecord::next(symbol.as_str(), price, prior, now);

                frames.push(PriceFrame::new(symbol.as_str(), price));
                records.insert(symbol.clone(), record);
            }
        });

        telemetry::record_synthetic_update(frames.len());
        tracing::debug!(count = frames.len(), "Applied synthetic price batch");

        for frame in frames {
            self.gateway.send(&frame.to_string());
        }
    }

    /// Merge one inbound `symbol|price` frame
    ///
    /// Malformed frames are dropped without touching the state. Returns
    /// whether the frame was applied.
    pub fn merge_inbound(&self, raw: &str) -> bool {
        let Some(frame) = PriceFrame::parse(raw) else {
            telemetry::record_frame(false);
            tracing::debug!(frame = %raw, "Dropping malformed frame");
            return false;
        };

        let now = self.clock.now_millis();
        self.state.send_modify(|state| {
            let records = state.make_mut();
            let record = PriceRecord::next(
                frame.symbol.as_str(),
                frame.price,
                records.get(&frame.symbol),
                now,
            );
            records.insert(frame.symbol.clone(), record);
        });

        telemetry::record_frame(true);
        true
    }

    /// Latest complete snapshot; never blocks on writers for longer than a swap
    pub fn snapshot(&self) -> PriceState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every completed mutation
    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.state.subscribe()
    }

    /// Merge frames from `frames` until the channel closes
    pub fn spawn_inbound(self: &Arc<Self>, mut frames: broadcast::Receiver<String>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match frames.recv().await {
                    Ok(frame) => {
                        store.merge_inbound(&frame);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Inbound frames overflowed, oldest dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("Inbound frame channel closed");
                        break;
                    }
                }
            }
        })
    }
}
