use super::connection::Connection;
use super::types::{
    ListResponse, QuotaAuthorizationRequest, QuotaAuthorizationResponse, QuotaCost,
    Subscription, SubscriptionList,
};
use super::{quota_search, require_non_empty, AccountQuotaClient, QUOTA_ID};
use crate::config::AmsConfig;
use crate::error::{Error, Result};
use crate::ClientVariant;
use async_trait::async_trait;

/// Live client backed by the accounts-management API
pub struct Client {
    connection: Connection,
}

impl Client {
    /// Fails without retry if the config is incomplete, the HTTP client cannot
    /// be built, or the token endpoint rejects the credentials
    pub async fn new(config: &AmsConfig) -> Result<Self> {
        let connection = Connection::connect(config).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl AccountQuotaClient for Client {
    async fn get_quota_cost(&self, organization_id: &str) -> Result<QuotaCost> {
        require_non_empty("organizationId", organization_id)?;

        let list: ListResponse<QuotaCost> = self
            .connection
            .get(
                &["organizations", organization_id, "quota_cost"],
                &[("search", quota_search())],
            )
            .await?;

        list.items.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!(
                "no quota cost matching '{}' for organization {}",
                QUOTA_ID, organization_id
            ))
        })
    }

    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        require_non_empty("subscriptionId", subscription_id)?;

        self.connection
            .get(&["subscriptions", subscription_id], &[])
            .await
    }

    async fn get_subscriptions(&self, size: u32, page: u32) -> Result<Vec<Subscription>> {
        let list: SubscriptionList = self
            .connection
            .get(
                &["subscriptions"],
                &[
                    ("search", quota_search()),
                    ("size", size.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        Ok(list.items)
    }

    async fn delete_subscription(&self, subscription_id: &str) -> Result<()> {
        require_non_empty("subscriptionId", subscription_id)?;

        self.connection
            .delete(&["subscriptions", subscription_id])
            .await
    }

    async fn quota_authorization(
        &self,
        account_username: &str,
        quota_version: &str,
    ) -> Result<QuotaAuthorizationResponse> {
        require_non_empty("accountUsername", account_username)?;

        let request = QuotaAuthorizationRequest::seat(account_username, quota_version);
        self.connection
            .post(&["quota_authorizations"], &request)
            .await
    }

    fn variant(&self) -> ClientVariant {
        ClientVariant::Live
    }
}
