//! Accounts-management (AMS) client.
//!
//! [`AccountQuotaClient`] is the capability the entitlements service depends
//! on. [`Client`] talks to the live API over an authenticated
//! [`Connection`]; [`TestClient`] returns canned data for local development.

pub mod client;
pub mod connection;
pub mod test_client;
pub mod token;
pub mod types;

pub use client::Client;
pub use connection::Connection;
pub use test_client::TestClient;
pub use types::{
    Account, ListResponse, Plan, QuotaAuthorizationRequest, QuotaAuthorizationResponse,
    QuotaCost, RelatedResource, ReservedResource, Subscription, SubscriptionList,
};

use crate::config::AmsConfig;
use crate::error::{Error, Result};
use crate::ClientVariant;
use async_trait::async_trait;
use std::sync::Arc;

pub const PRODUCT_ID: &str = "AnsibleWisdom";
pub const RESOURCE_NAME: &str = "ansible.wisdom";
pub const RESOURCE_TYPE: &str = "seat";
pub const QUOTA_ID: &str = "seat|ansible.wisdom";

/// Search expression selecting the product's seat quota
pub fn quota_search() -> String {
    format!("quota_id LIKE '{}%'", QUOTA_ID)
}

#[async_trait]
pub trait AccountQuotaClient: Send + Sync {
    /// First quota-cost record of `organization_id` matching the seat quota
    async fn get_quota_cost(&self, organization_id: &str) -> Result<QuotaCost>;

    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription>;

    /// One page of subscriptions matching the seat quota; `size`/`page` are
    /// passed through as given
    async fn get_subscriptions(&self, size: u32, page: u32) -> Result<Vec<Subscription>>;

    async fn delete_subscription(&self, subscription_id: &str) -> Result<()>;

    /// Reserve one seat for `account_username` under `quota_version`
    async fn quota_authorization(
        &self,
        account_username: &str,
        quota_version: &str,
    ) -> Result<QuotaAuthorizationResponse>;

    fn variant(&self) -> ClientVariant;
}

/// Pre-call guard shared by every variant
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Validation(format!("{} cannot be an empty string", field)));
    }
    Ok(())
}

/// `TestClient` when `config.debug` is set, otherwise a connected live client
pub async fn get_client(config: &AmsConfig) -> Result<Arc<dyn AccountQuotaClient>> {
    if config.debug {
        tracing::debug!("Using AMS test client");
        return Ok(Arc::new(TestClient));
    }
    Ok(Arc::new(Client::new(config).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_search_is_prefix_match() {
        assert_eq!(quota_search(), "quota_id LIKE 'seat|ansible.wisdom%'");
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("subscriptionId", "abc").is_ok());
        let err = require_non_empty("subscriptionId", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: subscriptionId cannot be an empty string"
        );
    }

    #[tokio::test]
    async fn test_get_client_debug_yields_test_client() {
        let config = AmsConfig {
            debug: true,
            ..AmsConfig::default()
        };
        let client = get_client(&config).await.unwrap();
        assert_eq!(client.variant(), ClientVariant::Mock);
    }

    #[tokio::test]
    async fn test_get_client_live_requires_credentials() {
        let result = get_client(&AmsConfig::default()).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
