use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::auth::model::{Role, Session};

/// Request body for `POST /auth/signin`
#[derive(Clone, Serialize, Validate)]
pub struct SignInRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl SignInRequestDto {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for SignInRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequestDto")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Request body for `POST /auth/signup`
#[derive(Clone, Serialize, Validate)]
pub struct SignUpRequestDto {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,

    #[validate(length(min = 6, max = 40, message = "Password must be 6-40 characters"))]
    pub password: String,

    /// Requested roles; the backend grants `TECH` when none are sent
    #[serde(rename = "role", skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

impl SignUpRequestDto {
    pub fn new(username: &str, password: &str, roles: Vec<Role>) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
            roles,
        }
    }
}

impl std::fmt::Debug for SignUpRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequestDto")
            .field("username", &self.username)
            .field("password", &"***")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Confirmation body such as `{"message": "User registered successfully!"}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

/// JWT response returned by a successful sign in
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponseDto {
    pub token: String,
    /// Token type (always "Bearer")
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<SignInResponseDto> for Session {
    fn from(response: SignInResponseDto) -> Self {
        let roles = response.roles.iter().map(|r| Role::parse(r)).collect();
        Session::new(response.token, response.id, response.username, roles)
    }
}
