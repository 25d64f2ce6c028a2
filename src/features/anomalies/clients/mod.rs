mod http_anomaly_client;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::anomalies::dtos::{Anomaly, AnomalyId, AnomalySubmission};

/// Anomaly endpoints of the backend
#[async_trait]
pub trait AnomalyApi: Send + Sync {
    /// `POST /anomalies/create` as an authenticated multipart request
    async fn create_anomaly(&self, token: &str, submission: &AnomalySubmission) -> Result<Anomaly>;

    /// `GET /anomalies/unassigned`
    async fn list_unassigned(&self, token: &str) -> Result<Vec<Anomaly>>;

    /// `POST /anomalies/{id}/assign`, assigning to the signed-in technician
    async fn assign_to_me(&self, token: &str, id: &AnomalyId) -> Result<Anomaly>;
}
