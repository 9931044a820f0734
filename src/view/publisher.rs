//! Reactive view recomputation

use super::{build_view, TrackerView};
use crate::flash::FlashEntries;
use crate::gateway::ConnectionStatus;
use crate::store::PriceState;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The four inputs a [`TrackerView`] is derived from
pub struct ViewInputs {
    pub prices: watch::Receiver<PriceState>,
    pub status: watch::Receiver<ConnectionStatus>,
    pub running: watch::Receiver<bool>,
    pub flashes: watch::Receiver<FlashEntries>,
}

/// Publishes a fresh [`TrackerView`] whenever any input changes
///
/// Emissions are suppressed when the recomputed view equals the last one.
pub struct ViewPublisher {
    view: watch::Sender<TrackerView>,
}

impl ViewPublisher {
    pub fn new(symbols: &[String]) -> Self {
        let (view, _) = watch::channel(TrackerView::initial(symbols));
        Self { view }
    }

    pub fn current(&self) -> TrackerView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerView> {
        self.view.subscribe()
    }

    /// Replace the published view unless it is value-equal; returns whether it changed
    pub fn publish(&self, next: TrackerView) -> bool {
        self.view.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Recompute on every input change until any input closes
    pub fn spawn(self: &Arc<Self>, symbols: Arc<[String]>, mut inputs: ViewInputs) -> JoinHandle<()> {
        let publisher = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let next = build_view(
                    &symbols,
                    &inputs.prices.borrow_and_update(),
                    *inputs.status.borrow_and_update(),
                    *inputs.running.borrow_and_update(),
                    &inputs.flashes.borrow_and_update(),
                );
                publisher.publish(next);

                let closed = tokio::select! {
                    r = inputs.prices.changed() => r.is_err(),
                    r = inputs.status.changed() => r.is_err(),
                    r = inputs.running.changed() => r.is_err(),
                    r = inputs.flashes.changed() => r.is_err(),
                };
                if closed {
                    tracing::debug!("View input closed, stopping publisher");
                    break;
                }
            }
        })
    }
}
