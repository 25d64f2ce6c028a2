use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::constants::{ROLE_ADMIN, ROLE_OPERATOR, ROLE_TECH};

/// Role granted by the backend, parsed from `ROLE_*` authority strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Admin,
    Operator,
    Tech,
    Other(String),
}

impl Role {
    /// Parse an authority string; matching ignores case and the `ROLE_` prefix
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let upper = trimmed.to_ascii_uppercase();
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "ADMIN" => Role::Admin,
            "OPERATOR" => Role::Operator,
            "TECH" => Role::Tech,
            _ => Role::Other(trimmed.to_string()),
        }
    }

    /// Authority string as the backend stores it
    pub fn authority(&self) -> &str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Operator => ROLE_OPERATOR,
            Role::Tech => ROLE_TECH,
            Role::Other(raw) => raw,
        }
    }

    /// Value expected by the user provisioning endpoint (`ADMIN`, `OPERATOR`, `TECH`)
    pub fn request_value(&self) -> String {
        let authority = self.authority().to_ascii_uppercase();
        authority
            .strip_prefix("ROLE_")
            .unwrap_or(&authority)
            .to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.request_value())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}

/// Screen the app should show next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AnomalyList,
    AdminDashboard,
}

/// Authenticated user, created on sign in and dropped on sign out or 401
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<Role>,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user_id: i64,
        username: impl Into<String>,
        mut roles: Vec<Role>,
    ) -> Self {
        roles.sort();
        roles.dedup();
        Self {
            token: token.into(),
            user_id,
            username: username.into(),
            roles,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(&Role::Admin)
    }

    /// Administrators land on the provisioning dashboard, everyone else on the anomaly list
    pub fn home_route(&self) -> Route {
        if self.is_admin() {
            Route::AdminDashboard
        } else {
            Route::AnomalyList
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("roles", &self.roles)
            .finish()
    }
}
