//! User-lookup (BOP) client: resolves a username to its owning organization.

use crate::config::{BopConfig, DEFAULT_MOCK_ORG_ID};
use crate::error::{Error, Result};
use crate::ClientVariant;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub user_name: String,
    pub org_id: String,
}

#[async_trait]
pub trait UserIdentityClient: Send + Sync {
    async fn get_user(&self, user_name: &str) -> Result<UserDetail>;

    fn variant(&self) -> ClientVariant;
}

/// Live BOP client
///
/// The identity service contract is not wired up yet, so every lookup fails
/// with [`Error::Unimplemented`] rather than pretending the user is unknown.
#[derive(Debug, Clone, Default)]
pub struct Client;

#[async_trait]
impl UserIdentityClient for Client {
    async fn get_user(&self, _user_name: &str) -> Result<UserDetail> {
        Err(Error::Unimplemented("BOP user lookup"))
    }

    fn variant(&self) -> ClientVariant {
        ClientVariant::Live
    }
}

/// Resolves every user to the same configured organization
#[derive(Debug, Clone)]
pub struct Mock {
    pub org_id: String,
}

impl Default for Mock {
    fn default() -> Self {
        Self {
            org_id: DEFAULT_MOCK_ORG_ID.to_string(),
        }
    }
}

#[async_trait]
impl UserIdentityClient for Mock {
    async fn get_user(&self, user_name: &str) -> Result<UserDetail> {
        Ok(UserDetail {
            user_name: user_name.to_string(),
            org_id: self.org_id.clone(),
        })
    }

    fn variant(&self) -> ClientVariant {
        ClientVariant::Mock
    }
}

/// `debug` selects the mock; construction never fails for either variant
pub fn get_client(debug: bool) -> Result<Box<dyn UserIdentityClient>> {
    if debug {
        return Ok(Box::new(Mock::default()));
    }
    Ok(Box::new(Client))
}

pub fn get_client_with(config: &BopConfig) -> Result<Box<dyn UserIdentityClient>> {
    if config.debug {
        return Ok(Box::new(Mock {
            org_id: config.mock_org_id.clone(),
        }));
    }
    Ok(Box::new(Client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_debug_client_resolves_fixed_org() {
        let client = get_client(true).unwrap();
        assert_eq!(client.variant(), ClientVariant::Mock);

        for name in ["jdoe", "", "someone@example.com"] {
            let user = client.get_user(name).await.unwrap();
            assert_eq!(
                user,
                UserDetail {
                    user_name: name.to_string(),
                    org_id: "12345678".to_string(),
                }
            );
        }
    }

    #[tokio::test]
    async fn test_non_debug_client_is_live() {
        let client = get_client(false).unwrap();
        assert_eq!(client.variant(), ClientVariant::Live);

        let result = client.get_user("jdoe").await;
        assert!(matches!(result, Err(Error::Unimplemented(_))));
    }

    #[tokio::test]
    async fn test_get_client_with_configured_org() {
        let config = BopConfig {
            debug: true,
            mock_org_id: "999".to_string(),
        };
        let client = get_client_with(&config).unwrap();
        let user = client.get_user("jdoe").await.unwrap();
        assert_eq!(user.org_id, "999");

        let live = get_client_with(&BopConfig::default()).unwrap();
        assert_eq!(live.variant(), ClientVariant::Live);
    }
}
