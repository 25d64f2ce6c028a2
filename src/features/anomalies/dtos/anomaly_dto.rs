use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{Bloc, Machine};
use crate::features::catalog::services::SelectionState;
use crate::shared::constants::{DEFAULT_PHOTO_EXTENSION, PHOTO_FILENAME_PREFIX};
use crate::shared::types::deserialize_lenient_datetime;
use crate::shared::validation::is_blank;

/// Server-assigned anomaly identifier; numeric and string ids are both accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnomalyId(pub String);

impl fmt::Display for AnomalyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnomalyId {
    fn from(value: &str) -> Self {
        AnomalyId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for AnomalyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => AnomalyId(n.to_string()),
            RawId::Text(s) => AnomalyId(s),
        })
    }
}

/// Workflow status of an anomaly
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnomalyStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Other(String),
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AnomalyStatus::Todo => "TODO",
            AnomalyStatus::InProgress => "IN_PROGRESS",
            AnomalyStatus::Done => "DONE",
            AnomalyStatus::Other(raw) => raw,
        }
    }
}

impl Serialize for AnomalyStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AnomalyStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // A null status is treated like a missing one
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(AnomalyStatus::Todo);
        };
        Ok(match raw.to_ascii_uppercase().replace([' ', '-'], "_").as_str() {
            "TODO" => AnomalyStatus::Todo,
            "IN_PROGRESS" => AnomalyStatus::InProgress,
            "DONE" => AnomalyStatus::Done,
            _ => AnomalyStatus::Other(raw),
        })
    }
}

/// Machine reference embedded in an anomaly record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRefDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Technician an anomaly is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Anomaly record as confirmed by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: AnomalyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AnomalyStatus,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub machine: Option<MachineRefDto>,
    #[serde(default)]
    pub assigned_to: Option<AssigneeDto>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub assignment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Photo picked on the device, read only when the draft is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub path: PathBuf,
}

impl PhotoAttachment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Lowercased extension of the source file, `jpg` when it has none
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string())
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(&self.extension())
    }

    /// Read the file into an upload part named after `timestamp_millis`
    pub async fn load(&self, timestamp_millis: i64) -> Result<PhotoPayload> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::warn!("Failed to read photo {}: {}", self.path.display(), e);
            AppError::validation(["photo"])
        })?;

        Ok(PhotoPayload {
            file_name: photo_file_name(&self.extension(), timestamp_millis),
            content_type: self.content_type().to_string(),
            bytes,
        })
    }
}

/// Binary part of the multipart submission
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoPayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoPayload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// In-progress anomaly form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnomalyDraft {
    pub title: String,
    pub description: String,
    pub bloc: Option<Bloc>,
    pub machine: Option<Machine>,
    pub photo: Option<PhotoAttachment>,
    /// Reused across manual retries of this draft when idempotency keys are on
    pub idempotency_key: Option<Uuid>,
}

impl AnomalyDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Copy the cascade's current bloc and machine into the draft
    pub fn sync_selection(&mut self, state: &SelectionState) {
        self.bloc = state.bloc().cloned();
        self.machine = state.machine().cloned();
    }

    /// Machine id to submit, or every field that blocks submission
    pub fn check(&self) -> std::result::Result<i64, Vec<&'static str>> {
        let mut missing = Vec::new();

        if is_blank(&self.title) {
            missing.push("title");
        }
        if self.bloc.is_none() {
            missing.push("bloc");
        }
        match (&self.bloc, &self.machine) {
            (_, None) => missing.push("machine"),
            (Some(bloc), Some(machine)) if machine.bloc_id != bloc.id => missing.push("machine"),
            _ => {}
        }
        if is_blank(&self.description) {
            missing.push("description");
        }

        match &self.machine {
            Some(machine) if missing.is_empty() => Ok(machine.id),
            _ => Err(missing),
        }
    }
}

/// Fields of one `POST /anomalies/create` multipart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalySubmission {
    pub title: String,
    pub description: String,
    /// Machine id, string-encoded as the form expects
    pub machine_id: String,
    pub photo: Option<PhotoPayload>,
    pub idempotency_key: Option<Uuid>,
}

impl AnomalySubmission {
    /// Text parts of the form, in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("machineId", self.machine_id.clone()),
        ]
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.form_fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

/// MIME type for a photo extension; unknown extensions are sent as JPEG
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "image/jpeg",
    }
}

/// `anomaly_<unix-millis>.<ext>`
pub fn photo_file_name(extension: &str, timestamp_millis: i64) -> String {
    format!("{}_{}.{}", PHOTO_FILENAME_PREFIX, timestamp_millis, extension)
}
