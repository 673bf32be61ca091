//! User administration. Every call requires an admin token; the server enforces
//! it and this service turns its refusals into readable messages.

use crate::client::ApiClient;
use crate::error::{ApiError, ServiceError};
use crate::models::{PaginatedUsers, Role, UserQuery, UserResponse};
use crate::transport::Transport;

pub const INVALID_ROLE: &str = r#"Invalid role. Role must be either "admin" or "user"."#;

/// Wording for one admin operation.
struct Messages {
    action: &'static str,
    /// Addresses a single user, so 404 means that user is gone.
    single_user: bool,
    bad_request: Option<&'static str>,
    fallback: &'static str,
}

const GET_USERS: Messages = Messages {
    single_user: false,
    action: "view users",
    bad_request: None,
    fallback: "Failed to fetch users",
};

const GET_USER: Messages = Messages {
    single_user: true,
    action: "view user details",
    bad_request: None,
    fallback: "Failed to fetch user details",
};

const UPDATE_ROLE: Messages = Messages {
    single_user: true,
    action: "update user roles",
    bad_request: Some("Cannot update role"),
    fallback: "Failed to update user role",
};

const UPDATE_STATUS: Messages = Messages {
    single_user: true,
    action: "update user status",
    bad_request: Some("Cannot update user status"),
    fallback: "Failed to update user status",
};

fn admin_error(err: ApiError, messages: &Messages) -> ServiceError {
    match err.status() {
        Some(403) => ServiceError::PermissionDenied(format!(
            "You do not have permission to {}. Admin access required.",
            messages.action
        )),
        Some(404) if messages.single_user => ServiceError::NotFound("User not found".into()),
        Some(400) => match messages.bad_request {
            Some(default) => ServiceError::Failed(err.detail_or(default)),
            None => ServiceError::from_api(err, messages.fallback),
        },
        _ => ServiceError::from_api(err, messages.fallback),
    }
}

pub struct AdminService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for AdminService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> AdminService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_users(&self, query: &UserQuery) -> Result<PaginatedUsers, ServiceError> {
        self.client
            .get_users(query)
            .await
            .map_err(|e| admin_error(e, &GET_USERS))
    }

    pub async fn get_user_details(&self, user_id: i64) -> Result<UserResponse, ServiceError> {
        self.client
            .get_user_details(user_id)
            .await
            .map_err(|e| admin_error(e, &GET_USER))
    }

    /// `role` comes straight from the UI and must be `admin` or `user`.
    pub async fn update_user_role(&self, user_id: i64, role: &str) -> Result<UserResponse, ServiceError> {
        let role = Role::parse_assignable(role)
            .ok_or_else(|| ServiceError::Validation(INVALID_ROLE.to_string()))?;
        let user = self
            .client
            .update_user_role(user_id, role)
            .await
            .map_err(|e| admin_error(e, &UPDATE_ROLE))?;
        tracing::info!(user_id, role = role.as_str(), "user role updated");
        Ok(user)
    }

    pub async fn update_user_status(&self, user_id: i64, is_active: bool) -> Result<UserResponse, ServiceError> {
        let user = self
            .client
            .update_user_status(user_id, is_active)
            .await
            .map_err(|e| admin_error(e, &UPDATE_STATUS))?;
        tracing::info!(user_id, is_active, "user status updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, user_json};

    #[tokio::test]
    async fn test_permission_messages() {
        let f = fixture();
        for _ in 0..4 {
            f.transport.push(403, r#"{"detail":"Not enough permissions"}"#);
        }
        let service = AdminService::new(f.client.clone());

        assert_eq!(
            service.get_users(&UserQuery::default()).await.unwrap_err().to_string(),
            "You do not have permission to view users. Admin access required."
        );
        assert_eq!(
            service.get_user_details(1).await.unwrap_err().to_string(),
            "You do not have permission to view user details. Admin access required."
        );
        assert_eq!(
            service.update_user_role(1, "admin").await.unwrap_err().to_string(),
            "You do not have permission to update user roles. Admin access required."
        );
        let err = service.update_user_status(1, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert_eq!(
            err.to_string(),
            "You do not have permission to update user status. Admin access required."
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let f = fixture();
        f.transport.push(404, r#"{"detail":"nope"}"#);
        f.transport.push(404, "");
        let service = AdminService::new(f.client.clone());

        assert_eq!(
            service.get_user_details(42).await.unwrap_err(),
            ServiceError::NotFound("User not found".into())
        );
        assert_eq!(
            service.update_user_status(42, true).await.unwrap_err().to_string(),
            "User not found"
        );
    }

    #[tokio::test]
    async fn test_bad_request_detail_or_default() {
        let f = fixture();
        f.transport.push(400, r#"{"detail":"Cannot demote yourself"}"#);
        f.transport.push(400, "");
        f.transport.push(400, "");
        let service = AdminService::new(f.client.clone());

        assert_eq!(
            service.update_user_role(1, "user").await.unwrap_err().to_string(),
            "Cannot demote yourself"
        );
        assert_eq!(
            service.update_user_role(1, "user").await.unwrap_err().to_string(),
            "Cannot update role"
        );
        assert_eq!(
            service.update_user_status(1, false).await.unwrap_err().to_string(),
            "Cannot update user status"
        );
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let f = fixture();
        f.transport.push(500, "");
        f.transport.push_error(ApiError::Network("offline".into()));
        let service = AdminService::new(f.client.clone());

        assert_eq!(
            service.get_users(&UserQuery::default()).await.unwrap_err().to_string(),
            "Failed to fetch users"
        );
        assert_eq!(
            service.update_user_role(1, "admin").await.unwrap_err().to_string(),
            "Failed to update user role"
        );
    }

    #[tokio::test]
    async fn test_invalid_role_makes_no_request() {
        let f = fixture();
        let err = AdminService::new(f.client.clone())
            .update_user_role(1, "superuser")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), INVALID_ROLE);
        assert!(f.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_update_round_trip() {
        let f = fixture();
        f.transport.push(
            200,
            &user_json(5, "user").replace(r#""is_active":true"#, r#""is_active":false"#),
        );

        let user = AdminService::new(f.client.clone())
            .update_user_status(5, false)
            .await
            .unwrap();

        assert!(!user.is_active);
        assert_eq!(
            f.transport.requests()[0].body,
            crate::transport::Body::Json(serde_json::json!({"is_active": false}))
        );
    }
}
