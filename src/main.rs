use clap::Parser;
use price_tracker::cli::{Cli, Commands};
use price_tracker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::parse(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    price_tracker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting price tracker");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Symbols: {}", config.tracker.symbols.join(", "));
            println!(
                "  Feed period: {} ms, flash: {} ms",
                config.tracker.feed_period_ms, config.tracker.flash_duration_ms
            );
            println!(
                "  Walk: initial {}..{}, step ±{}%",
                config.walk.min_initial_price,
                config.walk.max_initial_price,
                config.walk.max_step_pct * rust_decimal_macros::dec!(100)
            );
            println!(
                "  Gateway: {} (ping {}s, outbound {}, inbound {})",
                config.gateway.url,
                config.gateway.ping_interval_secs,
                config.gateway.outbound_buffer,
                config.gateway.inbound_buffer
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
