use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::http::ApiClient;
use crate::features::catalog::clients::CatalogApi;
use crate::features::catalog::dtos::{Bloc, Machine, MachineDto};

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_blocs(&self, token: &str) -> Result<Vec<Bloc>> {
        let builder = self.get("/blocs").bearer_auth(token);
        let blocs: Vec<Bloc> = self.send_json(builder, "list blocs").await?;

        tracing::debug!("Fetched {} blocs", blocs.len());
        Ok(blocs)
    }

    async fn list_machines(&self, token: &str, bloc_id: i64) -> Result<Vec<Machine>> {
        let builder = self
            .get(&format!("/blocs/{}/machines", bloc_id))
            .bearer_auth(token);
        let machines: Vec<MachineDto> = self.send_json(builder, "list machines").await?;

        tracing::debug!("Fetched {} machines for bloc {}", machines.len(), bloc_id);
        Ok(machines
            .into_iter()
            .map(|dto| dto.into_machine(bloc_id))
            .collect())
    }
}
