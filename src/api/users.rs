//! User Endpoints
//!
//! Admin user management.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::{Role, User, UserPage, UserSummary};

const USERS: &str = "admin-management/users";

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// `active` or `inactive`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

/// Fields an admin may change on a user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserPatch {
    /// The user as it should look once the patch lands
    pub fn apply(&self, user: &User) -> User {
        let mut next = user.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(role) = self.role {
            next.role = role;
        }
        next
    }
}

#[derive(Serialize)]
struct BulkIds {
    user_ids: Vec<u32>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserSummary,
}

#[derive(Deserialize)]
struct BulkResult {
    #[serde(default)]
    updated_count: u32,
}

// ========================
// Commands
// ========================

pub async fn list_users(api: &ApiClient, query: &UserQuery) -> Result<UserPage, ApiError> {
    api.get(&format!("{USERS}/list_users/"), query).await
}

/// Activate or deactivate `user`; yields the confirmed record
pub async fn set_user_active(api: &ApiClient, user: User, active: bool) -> Result<User, ApiError> {
    let action = if active { "activate" } else { "deactivate" };
    let envelope: UserEnvelope = api
        .post(&format!("{USERS}/{}/{action}/", user.id), &serde_json::json!({}))
        .await?;
    Ok(user.merge_summary(envelope.user))
}

pub async fn update_user(api: &ApiClient, user: User, patch: UserPatch) -> Result<User, ApiError> {
    let envelope: UserEnvelope = api
        .patch(&format!("{USERS}/{}/update_user/", user.id), &patch)
        .await?;
    Ok(patch.apply(&user).merge_summary(envelope.user))
}

/// Soft delete. The backend refuses admins and reports how many rows changed.
pub async fn delete_user(api: &ApiClient, id: u32) -> Result<(), ApiError> {
    let result: BulkResult = api
        .post(&format!("{USERS}/bulk_delete/"), &BulkIds { user_ids: vec![id] })
        .await?;
    if result.updated_count == 0 {
        return Err(ApiError::Status {
            status: 404,
            message: format!("user {id} was not deleted"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_skips_empty_filters() {
        let query = UserQuery {
            page: 2,
            limit: 25,
            role: Some(Role::DeliveryAgent),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "limit": 25, "role": "delivery_agent"})
        );
    }

    #[test]
    fn test_patch_apply_only_touches_set_fields() {
        let user: User = serde_json::from_str(
            r#"{"id": 5, "email": "d@chefsync.lk", "name": "Ravi", "role": "customer", "is_active": true}"#,
        )
        .unwrap();
        let patch = UserPatch {
            role: Some(Role::DeliveryAgent),
            ..Default::default()
        };
        let next = patch.apply(&user);
        assert_eq!(next.role, Role::DeliveryAgent);
        assert_eq!(next.name, "Ravi");
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({"role": "delivery_agent"}));
    }
}
