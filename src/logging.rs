//! Tracing setup and redaction helpers.
//!
//! Client secrets and bearer tokens pass through this crate on every call;
//! anything that may end up in a log field goes through [`SensitiveValue`].

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use std::fmt;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

/// Redacted rendering of a secret
///
/// Shows the first 4 characters followed by `***`; values of 8 characters or
/// fewer are fully masked.
#[derive(Clone, Debug)]
pub struct SensitiveValue<'a> {
    inner: &'a str,
}

impl<'a> SensitiveValue<'a> {
    /// # Example
    /// ```
    /// use entitlements_clients::logging::SensitiveValue;
    ///
    /// let token = "eyJhbGciOiJSUzI1NiJ9.payload";
    /// assert_eq!(SensitiveValue::new(token).to_string(), "eyJh***");
    /// ```
    pub fn new(value: &'a str) -> Self {
        Self { inner: value }
    }
}

impl<'a> fmt::Display for SensitiveValue<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VISIBLE: usize = 4;
        if self.inner.chars().count() <= VISIBLE * 2 {
            write!(f, "***")
        } else {
            let prefix: String = self.inner.chars().take(VISIBLE).collect();
            write!(f, "{}***", prefix)
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `config.level` when set. Fails if a subscriber is
/// already installed or the level is not a valid filter directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::Logging(format!("invalid level '{}': {}", config.level, e)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format == "json" {
        registry
            .with(tracing_fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(tracing_fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}
