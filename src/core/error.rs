use thiserror::Error;

use crate::features::auth::model::Route;
use crate::shared::constants::{
    GENERIC_REJECTION_MESSAGE, NETWORK_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE,
};

/// Every failure an operation can surface to a screen.
///
/// Transport and status errors are converted into one of these at the
/// operation boundary, so callers only ever match on four kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Required input missing or malformed; never sent to the server.
    #[error("Validation error: missing or invalid {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The backend answered 401 or no session token is held.
    #[error("Session expired")]
    SessionExpired,

    #[error("Rejected by server (HTTP {status}): {message}")]
    RejectedByServer { status: u16, message: String },

    /// Transport failure, timeout, or an unreadable success body.
    #[error("Network error: {0}")]
    Network(String),
}

impl AppError {
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AppError::Validation(fields.into_iter().map(Into::into).collect())
    }

    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string());
        AppError::RejectedByServer { status, message }
    }

    /// Whether the caller has to send the user back to the login entry point.
    pub fn requires_login(&self) -> bool {
        match self {
            AppError::SessionExpired => true,
            AppError::Validation(fields) => fields.iter().any(|f| f == "session"),
            _ => false,
        }
    }

    pub fn next_route(&self) -> Option<Route> {
        self.requires_login().then_some(Route::Login)
    }

    /// Text shown in the alert dialog for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(fields) => {
                format!("Please fill in the required fields: {}", fields.join(", "))
            }
            AppError::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            AppError::RejectedByServer { message, .. } => message.clone(),
            AppError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Names of the fields that failed validation, sorted
pub fn invalid_fields(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(invalid_fields(&errors))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
