use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::http::ApiClient;
use crate::features::admin::clients::AdminApi;
use crate::features::admin::dtos::{
    CreateUserRequestDto, NewBlocDto, NewMachineDto, UserSummaryDto,
};
use crate::features::catalog::dtos::{Bloc, Machine, MachineDto};

#[async_trait]
impl AdminApi for ApiClient {
    async fn create_user(&self, token: &str, request: &CreateUserRequestDto) -> Result<String> {
        tracing::debug!("Creating user {} with role {}", request.username, request.role);

        let builder = self.post("/admin/users").bearer_auth(token).json(request);
        let body = self.send_text(builder, "create user").await?;

        // Confirmation arrives as plain text or as a JSON string
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }

    async fn list_users(&self, token: &str) -> Result<Vec<UserSummaryDto>> {
        let builder = self.get("/admin/users").bearer_auth(token);
        self.send_json(builder, "list users").await
    }

    async fn create_bloc(&self, token: &str, request: &NewBlocDto) -> Result<Bloc> {
        let builder = self.post("/admin/blocs").bearer_auth(token).json(request);
        self.send_json(builder, "create bloc").await
    }

    async fn create_machine(
        &self,
        token: &str,
        bloc_id: i64,
        request: &NewMachineDto,
    ) -> Result<Machine> {
        let builder = self
            .post("/admin/blocs/machines")
            .query(&[("blocId", bloc_id)])
            .bearer_auth(token)
            .json(request);
        let machine: MachineDto = self.send_json(builder, "create machine").await?;

        Ok(machine.into_machine(bloc_id))
    }
}
