use super::types::{Account, Plan, QuotaAuthorizationResponse, QuotaCost, Subscription};
use super::{require_non_empty, AccountQuotaClient, PRODUCT_ID, QUOTA_ID};
use crate::error::{Error, Result};
use crate::ClientVariant;
use async_trait::async_trait;

/// Organization every canned subscription belongs to
pub const TEST_ORGANIZATION_ID: &str = "4384938490324";

/// Creator of the canned subscription list entry
pub const TEST_CREATOR: &str = "testuser";

/// Canned AMS responses for local development and tests; never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct TestClient;

#[async_trait]
impl AccountQuotaClient for TestClient {
    async fn get_quota_cost(&self, organization_id: &str) -> Result<QuotaCost> {
        require_non_empty("organizationId", organization_id)?;

        Ok(QuotaCost {
            quota_id: QUOTA_ID.to_string(),
            ..QuotaCost::default()
        })
    }

    async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        require_non_empty("subscriptionId", subscription_id)?;

        Ok(Subscription {
            id: subscription_id.to_string(),
            organization_id: TEST_ORGANIZATION_ID.to_string(),
            ..Subscription::default()
        })
    }

    async fn get_subscriptions(&self, _size: u32, _page: u32) -> Result<Vec<Subscription>> {
        Ok(vec![Subscription {
            creator: Some(Account {
                username: TEST_CREATOR.to_string(),
                ..Account::default()
            }),
            plan: Some(Plan {
                id: None,
                name: PRODUCT_ID.to_string(),
                plan_type: PRODUCT_ID.to_string(),
            }),
            ..Subscription::default()
        }])
    }

    async fn delete_subscription(&self, _subscription_id: &str) -> Result<()> {
        Ok(())
    }

    // No canned reservation exists yet; callers get an explicit pending error
    async fn quota_authorization(
        &self,
        _account_username: &str,
        _quota_version: &str,
    ) -> Result<QuotaAuthorizationResponse> {
        Err(Error::Unimplemented("quota authorization in the AMS test client"))
    }

    fn variant(&self) -> ClientVariant {
        ClientVariant::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_subscription_echoes_id() {
        for id in ["1", "2abc", "sub-with-dashes", "ünïcode"] {
            let sub = TestClient.get_subscription(id).await.unwrap();
            assert_eq!(sub.id, id);
            assert_eq!(sub.organization_id, TEST_ORGANIZATION_ID);
        }
    }

    #[tokio::test]
    async fn test_get_subscription_rejects_empty_id() {
        let result = TestClient.get_subscription("").await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_subscription_always_succeeds() {
        assert!(TestClient.delete_subscription("anything").await.is_ok());
        assert!(TestClient.delete_subscription("does-not-exist").await.is_ok());
        assert!(TestClient.delete_subscription("").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_subscriptions_is_single_canned_entry() {
        for (size, page) in [(0, 0), (10, 1), (100, 42)] {
            let subs = TestClient.get_subscriptions(size, page).await.unwrap();
            assert_eq!(subs.len(), 1);

            let sub = &subs[0];
            assert_eq!(sub.creator.as_ref().unwrap().username, TEST_CREATOR);
            let plan = sub.plan.as_ref().unwrap();
            assert_eq!(plan.name, "AnsibleWisdom");
            assert_eq!(plan.plan_type, "AnsibleWisdom");
        }
    }

    #[tokio::test]
    async fn test_get_quota_cost_returns_seat_quota() {
        let cost = TestClient.get_quota_cost("any-org").await.unwrap();
        assert_eq!(cost.quota_id, "seat|ansible.wisdom");
    }

    #[tokio::test]
    async fn test_get_quota_cost_rejects_empty_org() {
        let result = TestClient.get_quota_cost("").await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_quota_authorization_is_pending() {
        let result = TestClient.quota_authorization("jdoe", "v1").await;
        assert!(matches!(result, Err(Error::Unimplemented(_))));
    }
}
