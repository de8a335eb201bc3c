/*
[INPUT]:  Optional settings file, ALT5_* environment variables
[OUTPUT]: Parsed runner settings and adapter credentials
[POS]:    Configuration layer - credentials, endpoint and test order
[UPDATE]: When adding new configuration options
*/

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use alt5_pro_adapter::{ClientConfig, Credentials, Environment};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prefix of every environment variable read by the runner
pub const ENV_PREFIX: &str = "ALT5";

/// Top-level runner configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Deployment to talk to
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment's base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Login email (`ALT5_PAY_EMAIL`)
    #[serde(default)]
    pub pay_email: Option<String>,
    /// Login password (`ALT5_PAY_PASSWORD`)
    #[serde(default)]
    pub pay_password: Option<String>,
    /// API public key (`ALT5_PUBLIC_KEY`)
    #[serde(default)]
    pub public_key: Option<String>,
    /// API private key (`ALT5_PRIVATE_KEY`)
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub test_order: TestOrderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Order placed and cancelled by the smoke scenario
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TestOrderConfig {
    #[serde(default = "default_instrument")]
    pub instrument: String,
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// Far from market so the order rests
    #[serde(default = "default_price")]
    pub price: Decimal,
    /// Pause between placing and cancelling
    #[serde(default = "default_cancel_delay_ms")]
    pub cancel_delay_ms: u64,
}

impl Default for TestOrderConfig {
    fn default() -> Self {
        Self {
            instrument: default_instrument(),
            amount: default_amount(),
            price: default_price(),
            cancel_delay_ms: default_cancel_delay_ms(),
        }
    }
}

impl TestOrderConfig {
    pub fn cancel_delay(&self) -> Duration {
        Duration::from_millis(self.cancel_delay_ms)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_instrument() -> String {
    "xrp_usd".to_string()
}

fn default_amount() -> Decimal {
    Decimal::ONE
}

fn default_price() -> Decimal {
    Decimal::new(1, 2)
}

fn default_cancel_delay_ms() -> u64 {
    2_000
}

impl Settings {
    /// Load settings from an optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, None)
    }

    /// Load settings with an explicit environment map (`None` reads the process environment)
    pub fn from_sources(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let settings: Self = builder
            .build()
            .context("read settings sources")?
            .try_deserialize()
            .context("parse settings")?;
        Ok(settings)
    }

    /// API key credentials, when both halves are configured
    pub fn api_key_credentials(&self) -> Option<Credentials> {
        match (non_empty(&self.public_key), non_empty(&self.private_key)) {
            (Some(public_key), Some(private_key)) => {
                Some(Credentials::api_key(public_key, private_key))
            }
            _ => None,
        }
    }

    /// Email/password credentials, when both are configured
    pub fn login_credentials(&self) -> Option<Credentials> {
        match (non_empty(&self.pay_email), non_empty(&self.pay_password)) {
            (Some(email), Some(password)) => Some(Credentials::login(email, password)),
            _ => None,
        }
    }

    /// Preferred credentials: API key first, then email/password
    pub fn credentials(&self) -> Result<Credentials> {
        if let Some(credentials) = self.api_key_credentials() {
            return Ok(credentials);
        }
        if let Some(credentials) = self.login_credentials() {
            return Ok(credentials);
        }
        bail!(
            "no credentials configured: set {ENV_PREFIX}_PUBLIC_KEY/{ENV_PREFIX}_PRIVATE_KEY \
             or {ENV_PREFIX}_PAY_EMAIL/{ENV_PREFIX}_PAY_PASSWORD"
        )
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            environment: self.environment,
        }
    }

    pub fn base_url(&self) -> &str {
        match non_empty(&self.base_url) {
            Some(url) => url,
            None => self.environment.base_url(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
