mod http_catalog_client;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::catalog::dtos::{Bloc, Machine};

/// Read-only bloc and machine listings
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /blocs`
    async fn list_blocs(&self, token: &str) -> Result<Vec<Bloc>>;

    /// `GET /blocs/{blocId}/machines`
    async fn list_machines(&self, token: &str, bloc_id: i64) -> Result<Vec<Machine>>;
}
