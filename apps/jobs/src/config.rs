//! Environment-driven configuration for the jobs binary.

use planmore_core::constants::DEFAULT_INACTIVITY_THRESHOLD_DAYS;

/// Default sweep cadence: once a day.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 24 * 60 * 60;

pub struct Config {
    /// Directory holding the SQLite database file.
    pub data_dir: String,
    pub telegram_bot_token: Option<String>,
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub inactivity_threshold_days: i64,
    pub sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            data_dir: std::env::var("PM_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            telegram_bot_token: std::env::var("PM_TELEGRAM_BOT_TOKEN").ok(),
            mail_api_url: std::env::var("PM_MAIL_API_URL").ok(),
            mail_api_key: std::env::var("PM_MAIL_API_KEY").ok(),
            inactivity_threshold_days: std::env::var("PM_INACTIVITY_THRESHOLD_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INACTIVITY_THRESHOLD_DAYS),
            sweep_interval_secs: std::env::var("PM_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}
