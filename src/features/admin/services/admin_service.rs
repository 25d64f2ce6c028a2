use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::admin::clients::AdminApi;
use crate::features::admin::dtos::{
    clean_optional, CreateUserRequestDto, NewBlocDto, NewMachineDto, UserSummaryDto,
};
use crate::features::auth::model::Role;
use crate::features::auth::services::SessionStore;
use crate::features::catalog::dtos::{Bloc, Machine};

/// Provisioning of employees, blocs and machines from the admin dashboard.
///
/// Role enforcement happens on the backend; a non-admin session gets a
/// `RejectedByServer` with status 403.
pub struct AdminService {
    api: Arc<dyn AdminApi>,
    session: SessionStore,
}

impl AdminService {
    pub fn new(api: Arc<dyn AdminApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    // =========================================================================
    // EMPLOYEES
    // =========================================================================

    /// Create an employee account; returns the server's confirmation text
    pub async fn create_employee(&self, username: &str, password: &str, role: Role) -> Result<String> {
        if let Role::Other(raw) = &role {
            tracing::warn!("Refusing to create user with unsupported role {}", raw);
            return Err(AppError::validation(["role"]));
        }

        let request = CreateUserRequestDto {
            username: username.trim().to_string(),
            password: password.to_string(),
            role,
        };
        request.validate()?;

        let token = self.session.require_token().await?;
        let result = self.api.create_user(&token, &request).await;
        let message = self.session.observe(&token, result).await?;

        tracing::info!("Employee {} created as {}", request.username, request.role);
        Ok(message)
    }

    pub async fn list_employees(&self) -> Result<Vec<UserSummaryDto>> {
        let token = self.session.require_token().await?;
        let result = self.api.list_users(&token).await;
        self.session.observe(&token, result).await
    }

    // =========================================================================
    // BLOCS & MACHINES
    // =========================================================================

    pub async fn create_bloc(&self, name: &str, description: Option<&str>) -> Result<Bloc> {
        let request = NewBlocDto {
            name: name.trim().to_string(),
            description: clean_optional(description),
        };
        request.validate()?;

        let token = self.session.require_token().await?;
        let result = self.api.create_bloc(&token, &request).await;
        let bloc = self.session.observe(&token, result).await?;

        tracing::info!("Bloc {} created (id={})", bloc.name, bloc.id);
        Ok(bloc)
    }

    /// Register a machine inside an existing bloc
    pub async fn add_machine(
        &self,
        bloc_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Machine> {
        let request = NewMachineDto {
            name: name.trim().to_string(),
            description: clean_optional(description),
        };
        request.validate()?;

        let token = self.session.require_token().await?;
        let result = self.api.create_machine(&token, bloc_id, &request).await;
        let machine = self.session.observe(&token, result).await?;

        tracing::info!(
            "Machine {} added to bloc {} (id={})",
            machine.name,
            machine.bloc_id,
            machine.id
        );
        Ok(machine)
    }
}
