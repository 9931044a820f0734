//! Run command implementation

use crate::clock::SystemClock;
use crate::config::Config;
use crate::flash::{FlashState, PriceDirection};
use crate::gateway::{ConnectionGateway, LoopbackGateway, SocketGateway};
use crate::store::RngSource;
use crate::tracker::{PriceTracker, TrackerSettings};
use crate::view::TrackerView;
use clap::Args;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Use an in-process echo gateway instead of the configured socket
    #[arg(long)]
    pub loopback: bool,

    /// Start the synthetic feed right after connecting
    #[arg(long)]
    pub start_feed: bool,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub duration_secs: Option<u64>,

    /// Print each view as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let gateway: Arc<dyn ConnectionGateway> = if self.loopback {
            tracing::info!("Using loopback gateway");
            Arc::new(LoopbackGateway::echo(config.gateway.inbound_buffer))
        } else {
            tracing::info!(url = %config.gateway.url, "Using socket gateway");
            Arc::new(SocketGateway::new(
                config.gateway.ws_config(),
                config.gateway.inbound_buffer,
            ))
        };

        let tracker = PriceTracker::new(
            TrackerSettings::from_config(config),
            gateway,
            Box::new(RngSource::from_entropy()),
            Arc::new(SystemClock),
        );
        let mut views = tracker.view();

        tracker.connect();
        if self.start_feed {
            tracker.toggle_feed();
        }

        let deadline = async {
            match self.duration_secs {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);

        self.print(&views.borrow_and_update())?;
        loop {
            tokio::select! {
                changed = views.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = views.borrow_and_update().clone();
                    self.print(&view)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
                _ = &mut deadline => {
                    tracing::info!("Run duration elapsed, shutting down");
                    break;
                }
            }
        }

        tracker.shutdown();
        Ok(())
    }

    fn print(&self, view: &TrackerView) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(view)?);
        } else {
            print!("{}", render_table(view));
        }
        Ok(())
    }
}

/// Plain-text rendering of one view
pub fn render_table(view: &TrackerView) -> String {
    let mut out = String::new();
    let feed = if view.feed_running { "running" } else { "stopped" };
    let _ = writeln!(out, "[{}] feed {}", view.connection_status, feed);

    for row in &view.rows {
        let arrow = match row.direction {
            PriceDirection::Up => "↑",
            PriceDirection::Down => "↓",
            PriceDirection::None => " ",
        };
        let flash = match row.flash {
            FlashState::Up => " +",
            FlashState::Down => " -",
            FlashState::None => "",
        };
        let _ = writeln!(
            out,
            "  {:<8} {:>12} {}{}",
            row.symbol, row.price_text, arrow, flash
        );
    }
    out
}
