use crate::error::{Error, Result};
use crate::logging::SensitiveValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Org id handed out by the BOP mock when nothing else is configured
pub const DEFAULT_MOCK_ORG_ID: &str = "12345678";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ams: AmsConfig,
    #[serde(default)]
    pub bop: BopConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accounts-management connection settings
#[derive(Clone, Deserialize, Serialize)]
pub struct AmsConfig {
    /// Use the canned `TestClient` instead of the live API
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// OAuth token endpoint used for the client-credentials grant
    #[serde(default)]
    pub token_url: String,
    /// Accounts-management API host, e.g. `https://api.openshift.com`
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BopConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_mock_org_id")]
    pub mock_org_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_mock_org_id() -> String {
    DEFAULT_MOCK_ORG_ID.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for AmsConfig {
    fn default() -> Self {
        Self {
            debug: false,
            client_id: String::new(),
            client_secret: String::new(),
            token_url: String::new(),
            url: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for BopConfig {
    fn default() -> Self {
        Self {
            debug: false,
            mock_org_id: default_mock_org_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Hand-written so the client secret never reaches a log line
impl fmt::Debug for AmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmsConfig")
            .field("debug", &self.debug)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &SensitiveValue::new(&self.client_secret).to_string(),
            )
            .field("token_url", &self.token_url)
            .field("url", &self.url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl AmsConfig {
    /// Check everything the live client needs before it opens a connection
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("token_url", &self.token_url),
            ("url", &self.url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("ams.{} must be set", name)));
            }
        }

        for (name, value) in [("token_url", &self.token_url), ("url", &self.url)] {
            let parsed = url::Url::parse(value)
                .map_err(|e| Error::Config(format!("ams.{} is not a valid URL: {}", name, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "ams.{} must use http or https, got '{}'",
                    name,
                    parsed.scheme()
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(Error::Config(
                "ams.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from a TOML file, overridden by `ENTITLEMENTS__*` variables
pub fn load_config(path: &Path) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ENTITLEMENTS").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<()> {
    // Credentials only matter when the live AMS client will be built
    if !cfg.ams.debug {
        cfg.ams.validate()?;
    }

    if cfg.bop.debug && cfg.bop.mock_org_id.trim().is_empty() {
        return Err(Error::Config(
            "bop.mock_org_id cannot be empty when bop.debug is enabled".to_string(),
        ));
    }

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => {
            return Err(Error::Config(format!(
                "Invalid logging.format '{}', expected 'text' or 'json'",
                other
            )))
        }
    }

    Ok(())
}
