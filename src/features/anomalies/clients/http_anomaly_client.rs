use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::core::error::{AppError, Result};
use crate::core::http::ApiClient;
use crate::features::anomalies::clients::AnomalyApi;
use crate::features::anomalies::dtos::{Anomaly, AnomalyId, AnomalySubmission};
use crate::shared::constants::IDEMPOTENCY_KEY_HEADER;

fn build_form(submission: &AnomalySubmission) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in submission.form_fields() {
        form = form.text(name, value);
    }

    if let Some(photo) = &submission.photo {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)
            .map_err(|e| {
                tracing::warn!("Invalid photo content type {}: {}", photo.content_type, e);
                AppError::validation(["photo"])
            })?;
        form = form.part("photo", part);
    }

    Ok(form)
}

#[async_trait]
impl AnomalyApi for ApiClient {
    async fn create_anomaly(&self, token: &str, submission: &AnomalySubmission) -> Result<Anomaly> {
        let form = build_form(submission)?;

        let mut builder = self
            .post("/anomalies/create")
            .bearer_auth(token)
            .multipart(form);
        if let Some(key) = submission.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key.to_string());
        }

        tracing::debug!(
            "Creating anomaly for machine {} (photo: {})",
            submission.machine_id,
            submission.photo.is_some()
        );
        self.send_json(builder, "create anomaly").await
    }

    async fn list_unassigned(&self, token: &str) -> Result<Vec<Anomaly>> {
        let builder = self.get("/anomalies/unassigned").bearer_auth(token);
        self.send_json(builder, "list unassigned anomalies").await
    }

    async fn assign_to_me(&self, token: &str, id: &AnomalyId) -> Result<Anomaly> {
        let builder = self
            .post(&format!("/anomalies/{}/assign", id))
            .bearer_auth(token);
        self.send_json(builder, "assign anomaly").await
    }
}
