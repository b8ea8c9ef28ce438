//! Configuration for the onboarding core.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Onboarding configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Mocked network latency
    #[serde(default)]
    pub network: NetworkConfig,

    /// OTP issuance and countdown
    #[serde(default)]
    pub otp: OtpConfig,

    /// Draft store backing file
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Simulated latency of the registration submit call, in milliseconds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,

    /// Simulated latency of the code verification call, in milliseconds
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    /// Seconds after issuance/resend during which resend is disabled
    #[serde(default = "default_resend_cooldown_secs")]
    pub resend_cooldown_secs: i64,

    /// Fixed demo code accepted by the mock verifier
    #[serde(default = "default_demo_code")]
    pub demo_code: String,

    /// Countdown ticker granularity, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the session file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, the draft lives in memory only)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: default_resend_cooldown_secs(),
            demo_code: default_demo_code(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_submit_delay_ms() -> u64 {
    900
}

fn default_verify_delay_ms() -> u64 {
    650
}

fn default_resend_cooldown_secs() -> i64 {
    60
}

fn default_demo_code() -> String {
    "123456".into()
}

fn default_tick_interval_ms() -> u64 {
    250
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/session.json")
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
