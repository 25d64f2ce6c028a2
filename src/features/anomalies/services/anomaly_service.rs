use std::sync::Arc;

use crate::core::error::Result;
use crate::features::anomalies::clients::AnomalyApi;
use crate::features::anomalies::dtos::{Anomaly, AnomalyId};
use crate::features::anomalies::models::AnomalyList;
use crate::features::auth::services::SessionStore;

/// List screen operations: initial load and "assign to me"
pub struct AnomalyService {
    api: Arc<dyn AnomalyApi>,
    session: SessionStore,
}

impl AnomalyService {
    pub fn new(api: Arc<dyn AnomalyApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Replace the list with the anomalies nobody has taken yet
    pub async fn load_unassigned(&self, list: &mut AnomalyList) -> Result<usize> {
        let token = self.session.require_token().await?;
        let result = self.api.list_unassigned(&token).await;
        let anomalies = self.session.observe(&token, result).await?;

        tracing::debug!("Loaded {} unassigned anomalies", anomalies.len());
        list.replace_all(anomalies);
        Ok(list.len())
    }

    /// Take an anomaly; the list entry is replaced by the server's record
    pub async fn assign_to_me(&self, list: &mut AnomalyList, id: &AnomalyId) -> Result<Anomaly> {
        let token = self.session.require_token().await?;
        let result = self.api.assign_to_me(&token, id).await;
        let anomaly = self.session.observe(&token, result).await?;

        if !list.replace(anomaly.clone()) {
            tracing::debug!("Assigned anomaly {} was not in the local list", id);
        }
        tracing::info!("Anomaly {} assigned, status {}", id, anomaly.status.as_str());

        Ok(anomaly)
    }
}
