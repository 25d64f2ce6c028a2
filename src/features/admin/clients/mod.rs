mod http_admin_client;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::admin::dtos::{
    CreateUserRequestDto, NewBlocDto, NewMachineDto, UserSummaryDto,
};
use crate::features::catalog::dtos::{Bloc, Machine};

/// Provisioning endpoints, restricted to administrators by the backend
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /admin/users`; answers with a confirmation message
    async fn create_user(&self, token: &str, request: &CreateUserRequestDto) -> Result<String>;

    /// `GET /admin/users`
    async fn list_users(&self, token: &str) -> Result<Vec<UserSummaryDto>>;

    /// `POST /admin/blocs`
    async fn create_bloc(&self, token: &str, request: &NewBlocDto) -> Result<Bloc>;

    /// `POST /admin/blocs/machines?blocId={blocId}`
    async fn create_machine(
        &self,
        token: &str,
        bloc_id: i64,
        request: &NewMachineDto,
    ) -> Result<Machine>;
}
