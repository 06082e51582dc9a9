//! Runtime configuration.
//!
//! Values come from built-in defaults, overridden by `TRIPTYCH_*` environment
//! variables (a `.env` file is honoured when the binary loads it first).

use crate::error::TriptychError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

pub const ENV_PREFIX: &str = "TRIPTYCH_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub loglevel: String,
    pub rates_url: Url,
    pub proxy: Option<Url>,
    /// Request timeout for the rate fetch. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    pub screen_width: u32,
    pub screen_height: u32,
    pub background_opacity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            rates_url: Url::parse(DEFAULT_RATES_URL).expect("default rates url is valid"),
            proxy: None,
            request_timeout_secs: None,
            screen_width: 1920,
            screen_height: 1080,
            background_opacity: 0.7,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, TriptychError> {
        Self::from_figment(Figment::from(Serialized::defaults(Config::default())))
    }

    fn from_figment(base: Figment) -> Result<Self, TriptychError> {
        let cfg = base.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        Ok(cfg)
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid TRIPTYCH_* configuration"));
