use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::features::auth::model::Role;
use crate::shared::validation::USERNAME_REGEX;

// =============================================================================
// EMPLOYEE DTOs
// =============================================================================

/// Request body for `POST /admin/users`
#[derive(Clone, Serialize, Validate)]
pub struct CreateUserRequestDto {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1-50 characters"),
        regex(path = *USERNAME_REGEX, message = "Username contains invalid characters")
    )]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Sent as `ADMIN`, `OPERATOR` or `TECH`
    pub role: Role,
}

impl std::fmt::Debug for CreateUserRequestDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequestDto")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

/// Employee as listed by `GET /admin/users`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserSummaryDto {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<Role>,
}

/// Roles arrive either as plain strings or as role entities `{id, name}`
fn deserialize_roles<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Role>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RoleEntry {
        Name(String),
        Entity { name: String },
    }

    let entries = Vec::<RoleEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            RoleEntry::Name(name) | RoleEntry::Entity { name } => Role::parse(&name),
        })
        .collect())
}

// =============================================================================
// BLOC & MACHINE DTOs
// =============================================================================

/// Request body for `POST /admin/blocs`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewBlocDto {
    #[validate(length(min = 1, max = 100, message = "Bloc name must be 1-100 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /admin/blocs/machines?blocId=..`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewMachineDto {
    #[validate(length(min = 1, max = 100, message = "Machine name must be 1-100 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Trim text input; empty optional text is dropped
pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
