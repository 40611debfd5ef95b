//! Authenticated connection to the accounts-management API.

use super::token::TokenSource;
use crate::config::AmsConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const API_SEGMENTS: [&str; 3] = ["api", "accounts_mgmt", "v1"];

/// Error body returned by the accounts-management API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    operation_id: Option<String>,
}

/// HTTP client, API root and token source, set once at construction
pub struct Connection {
    http: Client,
    base_url: Url,
    tokens: TokenSource,
}

impl Connection {
    /// Validate config, build the HTTP client and prove the credentials
    /// with an initial token request
    pub async fn connect(config: &AmsConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.url)
            .map_err(|e| Error::Config(format!("ams.url is not a valid URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "ams.url '{}' cannot be used as a base URL",
                config.url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Connection(format!("failed to build HTTP client: {}", e)))?;

        let tokens = TokenSource::new(http.clone(), config);
        tokens.bearer().await.map_err(|e| {
            Error::Connection(format!(
                "initial token request to {} failed: {}",
                config.token_url, e
            ))
        })?;

        info!(
            url = %base_url,
            client_id = %config.client_id,
            "Connected to accounts-management API"
        );

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// `{url}/api/accounts_mgmt/v1/{segments...}` with each segment escaped
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_SEGMENTS).extend(segments);
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments);
        let request = self.http.get(url.clone()).query(query);
        let response = self.send(request, Method::GET, &url).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments);
        let request = self.http.post(url.clone()).json(body);
        let response = self.send(request, Method::POST, &url).await?;
        decode(response).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments);
        let request = self.http.delete(url.clone());
        self.send(request, Method::DELETE, &url).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, method: Method, url: &Url) -> Result<Response> {
        let bearer = self.tokens.bearer().await?;
        let response = request.header("Authorization", bearer).send().await?;

        let status = response.status();
        debug!(method = %method, path = %url.path(), status = %status, "AMS request");

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let (code, reason, operation_id) = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => (
                body.code,
                body.reason.unwrap_or_else(|| text.clone()),
                body.operation_id,
            ),
            Err(_) => (None, text, None),
        };

        warn!(
            method = %method,
            path = %url.path(),
            status = %status,
            code = code.as_deref().unwrap_or("-"),
            operation_id = operation_id.as_deref().unwrap_or("-"),
            "AMS request failed"
        );

        Err(Error::Upstream {
            status,
            code,
            reason,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
