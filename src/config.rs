//! Configuration types for price-tracker

use crate::feed::DEFAULT_FEED_PERIOD;
use crate::flash::DEFAULT_FLASH_DURATION;
use crate::gateway::{DEFAULT_INBOUND_BUFFER, DEFAULT_GATEWAY_URL};
use crate::store::RandomWalk;
use crate::telemetry::LogFormat;
use crate::ws::WsConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Tracked symbols and engine timings
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Ordered ticker symbols; defines placeholder rows and the synthetic universe
    pub symbols: Vec<String>,

    /// Time between synthetic batches (milliseconds)
    #[serde(default = "default_feed_period_ms")]
    pub feed_period_ms: u64,

    /// Flash lifetime (milliseconds)
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,
}

impl TrackerConfig {
    pub fn feed_period(&self) -> Duration {
        Duration::from_millis(self.feed_period_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

fn default_feed_period_ms() -> u64 {
    DEFAULT_FEED_PERIOD.as_millis() as u64
}
fn default_flash_duration_ms() -> u64 {
    DEFAULT_FLASH_DURATION.as_millis() as u64
}

/// Synthetic random walk configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WalkConfig {
    /// Lower bound for a never-seen symbol's starting price
    #[serde(default = "default_min_initial_price")]
    pub min_initial_price: Decimal,

    /// Upper bound for a never-seen symbol's starting price
    #[serde(default = "default_max_initial_price")]
    pub max_initial_price: Decimal,

    /// Largest step per tick as a fraction of the previous price
    #[serde(default = "default_max_step_pct")]
    pub max_step_pct: Decimal,
}

fn default_min_initial_price() -> Decimal {
    dec!(50.00)
}
fn default_max_initial_price() -> Decimal {
    dec!(500.00)
}
fn default_max_step_pct() -> Decimal {
    dec!(0.02) // 2%
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            min_initial_price: default_min_initial_price(),
            max_initial_price: default_max_initial_price(),
            max_step_pct: default_max_step_pct(),
        }
    }
}

impl WalkConfig {
    pub fn random_walk(&self) -> RandomWalk {
        RandomWalk {
            min_initial: self.min_initial_price,
            max_initial: self.max_initial_price,
            max_step: self.max_step_pct,
        }
    }
}

/// Socket gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,

    /// Outbound frames queued before new ones are dropped
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,

    /// Inbound frames buffered per subscriber; oldest dropped on overflow
    #[serde(default = "default_inbound_buffer")]
    pub inbound_buffer: usize,
}

fn default_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}
fn default_connect_timeout_secs() -> u64 {
    10
}
fn default_ping_interval_secs() -> u64 {
    30
}
fn default_outbound_buffer() -> usize {
    256
}
fn default_inbound_buffer() -> usize {
    DEFAULT_INBOUND_BUFFER
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ping_interval_secs: default_ping_interval_secs(),
            outbound_buffer: default_outbound_buffer(),
            inbound_buffer: default_inbound_buffer(),
        }
    }
}

impl GatewayConfig {
    pub fn ws_config(&self) -> WsConfig {
        WsConfig::new(&self.url)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .ping_interval(Duration::from_secs(self.ping_interval_secs))
            .outbound_buffer(self.outbound_buffer)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one tracked symbol is required")]
    NoSymbols,

    #[error("blank tracked symbol at position {0}")]
    BlankSymbol(usize),

    #[error("tracked symbol {0:?} contains the frame separator")]
    SeparatorInSymbol(String),

    #[error("duplicate tracked symbol {0:?}")]
    DuplicateSymbol(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("initial price range [{min}, {max}] is invalid")]
    InitialPriceRange { min: Decimal, max: Decimal },

    #[error("max_step_pct {0} must be in (0, 1)")]
    StepOutOfRange(Decimal),
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let symbols = &self.tracker.symbols;
        if symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for (i, symbol) in symbols.iter().enumerate() {
            if symbol.trim().is_empty() {
                return Err(ConfigError::BlankSymbol(i));
            }
            if symbol.contains(crate::store::FRAME_SEPARATOR) {
                return Err(ConfigError::SeparatorInSymbol(symbol.clone()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.tracker.feed_period_ms == 0 {
            return Err(ConfigError::ZeroDuration("feed_period_ms"));
        }
        if self.tracker.flash_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("flash_duration_ms"));
        }
        if self.gateway.ping_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("ping_interval_secs"));
        }

        let walk = &self.walk;
        if walk.min_initial_price <= Decimal::ZERO || walk.min_initial_price > walk.max_initial_price
        {
            return Err(ConfigError::InitialPriceRange {
                min: walk.min_initial_price,
                max: walk.max_initial_price,
            });
        }
        if walk.max_step_pct <= Decimal::ZERO || walk.max_step_pct >= Decimal::ONE {
            return Err(ConfigError::StepOutOfRange(walk.max_step_pct));
        }

        Ok(())
    }
}
