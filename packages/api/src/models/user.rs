//! # User and authentication payloads
//!
//! Wire types for the `/auth` and `/admin/users` endpoints.
//!
//! ## [`UserResponse`]
//!
//! The server's view of an account: numeric `id`, `email`, `name`, [`Role`],
//! `is_active` flag and `created_at`. It is also what the client caches next to
//! the token (see [`store::TokenStore::save_user`]), so it must round-trip
//! through JSON without loss.
//!
//! `role` is optional on purpose: a profile without a role is a valid
//! authenticated state that route guards resolve by re-fetching, rather than a
//! decode error.
//!
//! ## Requests
//!
//! - [`UserCreate`]: registration body. Its role is always [`Role::User`];
//!   promotion is an admin action on the server.
//! - [`LoginRequest`]: OAuth2 password-grant form fields.
//! - [`Token`]: login response.
//! - [`PaginatedUsers`]: `GET /admin/users` page with its [`PageMeta`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }

    /// Parse a role chosen in the admin UI. Only `admin` and `user` are assignable.
    pub fn parse_assignable(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// Account record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Get display name, falling back to email if name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn role_label(&self) -> &'static str {
        self.role.map(Role::as_str).unwrap_or("user")
    }
}

/// Registration body for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

/// What the registration form collects. Deliberately has no role field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// OAuth2 password-grant credentials, sent form-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
            ("grant_type".to_string(), "password".to_string()),
            ("scope".to_string(), String::new()),
        ]
    }
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginatedUsers {
    pub items: Vec<UserResponse>,
    #[serde(default)]
    pub meta: PageMeta,
}

/// Filters for `GET /admin/users`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserQuery {
    pub page: u32,
    pub size: u32,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            role: None,
            is_active: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_role_decodes() {
        let user: UserResponse =
            serde_json::from_str(r#"{"id":3,"email":"a@b.c","name":"Ann"}"#).unwrap();
        assert_eq!(user.role, None);
        assert!(user.is_active);
        assert!(!user.is_admin());
        assert_eq!(user.role_label(), "user");
    }

    #[test]
    fn test_unknown_role_does_not_fail_decode() {
        let user: UserResponse = serde_json::from_str(
            r#"{"id":3,"email":"a@b.c","name":"Ann","role":"owner","is_active":false}"#,
        )
        .unwrap();
        assert_eq!(user.role, Some(Role::Unknown));
        assert!(!user.is_active);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user: UserResponse =
            serde_json::from_str(r#"{"id":1,"email":"a@b.c","name":"  ","role":"admin"}"#).unwrap();
        assert_eq!(user.display_name(), "a@b.c");
        assert!(user.is_admin());
    }

    #[test]
    fn test_login_form_is_password_grant() {
        let fields = LoginRequest {
            username: "a@b.c".into(),
            password: "secret".into(),
        }
        .form_fields();
        assert!(fields.contains(&("grant_type".to_string(), "password".to_string())));
        assert!(fields.contains(&("scope".to_string(), String::new())));
    }

    #[test]
    fn test_assignable_roles() {
        assert_eq!(Role::parse_assignable("admin"), Some(Role::Admin));
        assert_eq!(Role::parse_assignable("user"), Some(Role::User));
        assert_eq!(Role::parse_assignable("root"), None);
    }
}
