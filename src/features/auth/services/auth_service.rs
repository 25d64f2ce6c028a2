use std::sync::Arc;
use validator::Validate;

use crate::core::error::{invalid_fields, AppError, Result};
use crate::features::auth::clients::AuthApi;
use crate::features::auth::dtos::{SignInRequestDto, SignUpRequestDto};
use crate::features::auth::model::{Role, Route, Session};
use crate::features::auth::services::SessionStore;
use crate::shared::constants::INVALID_CREDENTIALS_MESSAGE;

/// Sign up, sign in and sign out flows feeding the shared session store
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Authenticate and store the session.
    ///
    /// Returns the route for the user's role: administrators go to the
    /// provisioning dashboard, everyone else to the anomaly list.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Route> {
        let request = SignInRequestDto::new(username, password);
        request.validate()?;

        let response = self.api.sign_in(&request).await.map_err(|e| match e {
            // 401 here means bad credentials, not an expired session
            AppError::SessionExpired => AppError::RejectedByServer {
                status: 401,
                message: INVALID_CREDENTIALS_MESSAGE.to_string(),
            },
            other => other,
        })?;

        let session = Session::from(response);
        let route = session.home_route();
        self.session.set_session(session).await;

        Ok(route)
    }

    /// Register a new account; the caller goes back to the login screen.
    ///
    /// No session is created. Returns the server's confirmation message.
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
        roles: Vec<Role>,
    ) -> Result<String> {
        let request = SignUpRequestDto::new(username, password, roles);

        let mut fields = request
            .validate()
            .err()
            .map(|e| invalid_fields(&e))
            .unwrap_or_default();
        if password != confirm_password {
            fields.push("confirmPassword".to_string());
        }
        if request.roles.iter().any(|r| matches!(r, Role::Other(_))) {
            fields.push("role".to_string());
        }
        if !fields.is_empty() {
            tracing::warn!("Sign up blocked, invalid: {}", fields.join(", "));
            return Err(AppError::Validation(fields));
        }

        let response = self.api.sign_up(&request).await?;
        tracing::info!("Account {} registered", request.username);

        Ok(response.message)
    }

    pub async fn sign_out(&self) -> Route {
        self.session.clear().await;
        Route::Login
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
