//! Client-credentials token acquisition with an in-memory cache.

use crate::config::AmsConfig;
use crate::error::{Error, Result};
use crate::logging::SensitiveValue;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Refresh tokens that expire within this many seconds
const REFRESH_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 300;

/// Upper bound on the lifetime accepted from the token endpoint
const MAX_EXPIRES_IN_SECS: i64 = 86_400 * 365;

/// OAuth2 token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Unix timestamp
    pub expires_at: i64,
    /// Seconds the token was valid for when issued
    pub lifetime: i64,
}

impl AccessToken {
    fn from_response(response: TokenResponse, now: i64) -> Self {
        let lifetime = response
            .expires_in
            .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
            .clamp(0, MAX_EXPIRES_IN_SECS);

        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at: now.saturating_add(lifetime),
            lifetime,
        }
    }

    /// Short-lived tokens refresh at half their lifetime instead of the fixed margin
    pub fn should_refresh(&self, now: i64) -> bool {
        let margin = REFRESH_MARGIN_SECS.min(self.lifetime / 2);
        self.expires_at.saturating_sub(now) < margin
    }

    pub fn bearer_header(&self) -> String {
        let scheme = if self.token_type.eq_ignore_ascii_case("bearer") {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", scheme, self.access_token)
    }
}

/// Source of bearer tokens for the accounts-management API
pub struct TokenSource {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache: RwLock<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(http: Client, config: &AmsConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cache: RwLock::new(None),
        }
    }

    /// Request a fresh token from the token endpoint, bypassing the cache
    pub async fn fetch(&self) -> Result<AccessToken> {
        debug!(
            client_id = %self.client_id,
            token_url = %self.token_url,
            "Requesting client-credentials token"
        );

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Token(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                client_id = %self.client_id,
                "Token endpoint rejected client credentials"
            );
            return Err(Error::Token(format!("HTTP {} - {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Token(format!("invalid token response: {}", e)))?;

        let token = AccessToken::from_response(token, Utc::now().timestamp());

        debug!(
            access_token = %SensitiveValue::new(&token.access_token),
            expires_in = token.lifetime,
            "Token acquired"
        );

        Ok(token)
    }

    /// `Authorization` header value, refreshed when close to expiry
    pub async fn bearer(&self) -> Result<String> {
        {
            let cache = self.cache.read().await;
            if let Some(token) = cache.as_ref() {
                if !token.should_refresh(Utc::now().timestamp()) {
                    return Ok(token.bearer_header());
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cache.as_ref() {
            if !token.should_refresh(Utc::now().timestamp()) {
                return Ok(token.bearer_header());
            }
        }

        let token = self.fetch().await?;
        let header = token.bearer_header();
        *cache = Some(token);

        Ok(header)
    }
}
