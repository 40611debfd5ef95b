//! Accounts-management resource shapes.
//!
//! Field names follow the `accounts_mgmt/v1` JSON. Unknown fields are
//! ignored and absent ones fall back to their defaults, so partial bodies
//! (as returned by search endpoints) still decode.

use serde::{Deserialize, Serialize};

/// Paged collection envelope shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
    pub items: Vec<T>,
}

pub type SubscriptionList = ListResponse<Subscription>;

/// Allowed/consumed counts of one quota bucket for an organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaCost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub quota_id: String,
    pub allowed: i64,
    pub consumed: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedResource {
    pub resource_name: String,
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_model: Option<String>,
    pub cost: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: String,
}

/// One unit of a named resource to reserve (or that exceeded quota)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedResource {
    pub resource_name: String,
    pub resource_type: String,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_model: Option<String>,
    #[serde(default)]
    pub byoc: bool,
}

fn default_count() -> i64 {
    1
}

impl ReservedResource {
    pub fn new(resource_name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            resource_type: resource_type.into(),
            count: default_count(),
            availability_zone: None,
            billing_model: None,
            byoc: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaAuthorizationRequest {
    pub account_username: String,
    pub product_id: String,
    pub quota_version: String,
    pub reserve: bool,
    pub resources: Vec<ReservedResource>,
}

impl QuotaAuthorizationRequest {
    /// Reservation of a single seat of the entitlements product
    pub fn seat(account_username: &str, quota_version: &str) -> Self {
        Self {
            account_username: account_username.to_string(),
            product_id: super::PRODUCT_ID.to_string(),
            quota_version: quota_version.to_string(),
            reserve: true,
            resources: vec![ReservedResource::new(
                super::RESOURCE_NAME,
                super::RESOURCE_TYPE,
            )],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaAuthorizationResponse {
    pub allowed: bool,
    pub excess_resources: Vec<ReservedResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscription_decodes_plan_type() {
        let body = json!({
            "id": "1uX0dZ",
            "kind": "Subscription",
            "organization_id": "1MKVU4otCIuogoLtgtyU6wajxjW",
            "creator": {"id": "1bd5", "username": "jdoe", "kind": "Account"},
            "plan": {"id": "AnsibleWisdom", "name": "AnsibleWisdom", "type": "AnsibleWisdom"},
            "status": "Active",
            "cluster_billing_model": "standard"
        });

        let sub: Subscription = serde_json::from_value(body).unwrap();
        assert_eq!(sub.id, "1uX0dZ");
        assert_eq!(sub.creator.unwrap().username, "jdoe");
        let plan = sub.plan.unwrap();
        assert_eq!(plan.plan_type, "AnsibleWisdom");
        assert_eq!(sub.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_quota_cost_list_tolerates_missing_fields() {
        let body = json!({
            "kind": "QuotaCostList",
            "page": 1,
            "size": 1,
            "total": 1,
            "items": [{"quota_id": "seat|ansible.wisdom", "allowed": 10}]
        });

        let list: ListResponse<QuotaCost> = serde_json::from_value(body).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].allowed, 10);
        assert_eq!(list.items[0].consumed, 0);
        assert!(list.items[0].related_resources.is_empty());
    }

    #[test]
    fn test_seat_authorization_request_body() {
        let request = QuotaAuthorizationRequest::seat("jdoe", "v2");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["account_username"], "jdoe");
        assert_eq!(value["product_id"], "AnsibleWisdom");
        assert_eq!(value["quota_version"], "v2");
        assert_eq!(value["reserve"], true);
        assert_eq!(value["resources"][0]["resource_name"], "ansible.wisdom");
        assert_eq!(value["resources"][0]["resource_type"], "seat");
        assert_eq!(value["resources"][0]["count"], 1);
        assert!(value["resources"][0].get("availability_zone").is_none());
    }

    #[test]
    fn test_authorization_response_excess_resources() {
        let body = json!({
            "allowed": false,
            "excess_resources": [{"resource_name": "ansible.wisdom", "resource_type": "seat"}]
        });

        let response: QuotaAuthorizationResponse = serde_json::from_value(body).unwrap();
        assert!(!response.allowed);
        assert_eq!(response.excess_resources[0].count, 1);
        assert!(response.subscription.is_none());
    }
}
