use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::anomalies::clients::AnomalyApi;
use crate::features::anomalies::dtos::{Anomaly, AnomalyDraft, AnomalySubmission};
use crate::features::anomalies::models::AnomalyList;
use crate::features::auth::services::SessionStore;

/// Turns a completed draft into a server-confirmed anomaly.
///
/// No automatic retries: after a `Network` error the draft is left as it
/// was and the user may submit it again by hand. A timeout after the
/// server already stored the anomaly can therefore produce a duplicate
/// unless idempotency keys are enabled and honoured by the backend.
pub struct SubmissionService {
    api: Arc<dyn AnomalyApi>,
    session: SessionStore,
    idempotency_keys: bool,
}

impl SubmissionService {
    pub fn new(api: Arc<dyn AnomalyApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            idempotency_keys: false,
        }
    }

    /// Attach a per-draft `Idempotency-Key` header to every attempt
    pub fn with_idempotency_keys(mut self, enabled: bool) -> Self {
        self.idempotency_keys = enabled;
        self
    }

    /// Submit the draft.
    ///
    /// On success the confirmed anomaly is prepended to `list`, the draft is
    /// reset, and the caller returns to the list view. On failure `list`
    /// and the draft's fields are untouched; a 401 also ends the session.
    pub async fn submit(&self, draft: &mut AnomalyDraft, list: &mut AnomalyList) -> Result<Anomaly> {
        let token = self.session.token().await;

        let (token, machine_id) = match (token, draft.check()) {
            (Some(token), Ok(machine_id)) => (token, machine_id),
            (token, checked) => {
                let mut fields = checked.err().unwrap_or_default();
                if token.is_none() {
                    fields.push("session");
                }
                warn!("Anomaly submission blocked, missing: {}", fields.join(", "));
                return Err(AppError::validation(fields));
            }
        };

        let photo = match &draft.photo {
            Some(photo) => Some(photo.load(Utc::now().timestamp_millis()).await?),
            None => None,
        };

        let idempotency_key = if self.idempotency_keys {
            Some(*draft.idempotency_key.get_or_insert_with(Uuid::new_v4))
        } else {
            None
        };

        let submission = AnomalySubmission {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            machine_id: machine_id.to_string(),
            photo,
            idempotency_key,
        };

        let result = self.api.create_anomaly(&token, &submission).await;
        let anomaly = match self.session.observe(&token, result).await {
            Ok(anomaly) => anomaly,
            Err(e) => {
                match &e {
                    AppError::SessionExpired => {
                        warn!("Anomaly submission refused, session expired")
                    }
                    AppError::Network(reason) => {
                        warn!("Anomaly submission not delivered, draft kept: {}", reason)
                    }
                    other => warn!("Anomaly submission rejected: {}", other),
                }
                return Err(e);
            }
        };

        info!(
            "Anomaly {} created on machine {}",
            anomaly.id, submission.machine_id
        );

        list.prepend(anomaly.clone());
        *draft = AnomalyDraft::default();

        Ok(anomaly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::anomalies::dtos::{AnomalyId, PhotoAttachment};
    use crate::shared::test_helpers::{
        operator_session, sample_anomaly, sample_bloc, sample_machine, MockApi,
    };

    fn leak_draft() -> AnomalyDraft {
        AnomalyDraft {
            bloc: Some(sample_bloc(1, "Zone A")),
            machine: Some(sample_machine(5, "Press 1", 1)),
            ..AnomalyDraft::new("Leak", "Oil leak")
        }
    }

    async fn signed_in_service(api: &Arc<MockApi>) -> (SubmissionService, SessionStore) {
        let session = SessionStore::new();
        session.set_session(operator_session()).await;
        (SubmissionService::new(api.clone(), session.clone()), session)
    }

    fn created_leak() -> Anomaly {
        serde_json::from_str(
            r#"{"id":"x1","title":"Leak","description":"Oil leak","status":"TODO",
                "machine":{"id":5,"name":"Press 1"},"createdAt":"2025-03-04T08:15:00"}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_submit_prepends_and_discards_draft() {
        let api = Arc::new(MockApi::new());
        api.push_create(Ok(created_leak()));
        let (service, _) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        list.prepend(sample_anomaly("old", "Older anomaly"));
        let mut draft = leak_draft();

        let anomaly = service.submit(&mut draft, &mut list).await.unwrap();

        let sent = api.submissions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].field("title"), Some("Leak".to_string()));
        assert_eq!(sent[0].field("description"), Some("Oil leak".to_string()));
        assert_eq!(sent[0].field("machineId"), Some("5".to_string()));
        assert!(sent[0].photo.is_none());
        assert!(sent[0].idempotency_key.is_none());

        assert_eq!(anomaly, created_leak());
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[0], created_leak());
        assert_eq!(draft, AnomalyDraft::default());
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_the_network() {
        let api = Arc::new(MockApi::new());
        let (service, _) = signed_in_service(&api).await;
        let mut list = AnomalyList::new();

        let cases: Vec<(AnomalyDraft, &str)> = vec![
            (
                AnomalyDraft {
                    title: String::new(),
                    ..leak_draft()
                },
                "title",
            ),
            (
                AnomalyDraft {
                    description: " ".to_string(),
                    ..leak_draft()
                },
                "description",
            ),
            (
                AnomalyDraft {
                    bloc: None,
                    ..leak_draft()
                },
                "bloc",
            ),
            (
                AnomalyDraft {
                    machine: None,
                    ..leak_draft()
                },
                "machine",
            ),
        ];

        for (mut draft, field) in cases {
            let before = draft.clone();
            let err = service.submit(&mut draft, &mut list).await.unwrap_err();

            assert_eq!(err, AppError::validation([field]));
            assert_eq!(draft, before);
        }

        assert_eq!(api.create_calls(), 0);
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_session_requires_login() {
        let api = Arc::new(MockApi::new());
        let service = SubmissionService::new(api.clone(), SessionStore::new());
        let mut list = AnomalyList::new();
        let mut draft = AnomalyDraft::new("", "Oil leak");

        let err = service.submit(&mut draft, &mut list).await.unwrap_err();

        assert_eq!(
            err,
            AppError::validation(["title", "bloc", "machine", "session"])
        );
        assert!(err.requires_login());
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_keeps_list() {
        let api = Arc::new(MockApi::new());
        api.push_create(Err(AppError::SessionExpired));
        let (service, session) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        list.prepend(sample_anomaly("old", "Older anomaly"));
        let list_before = list.clone();
        let mut draft = leak_draft();

        let err = service.submit(&mut draft, &mut list).await.unwrap_err();

        assert_eq!(err, AppError::SessionExpired);
        assert_eq!(session.token().await, None);
        assert_eq!(list, list_before);
        assert_eq!(draft, leak_draft());
    }

    #[tokio::test]
    async fn test_timeout_keeps_draft_and_manual_retry_appends_once() {
        let api = Arc::new(MockApi::new());
        api.push_create(Err(AppError::Network("create anomaly timed out".to_string())));
        api.push_create(Ok(created_leak()));
        let (service, _) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        let mut draft = leak_draft();

        let err = service.submit(&mut draft, &mut list).await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
        assert_eq!(draft, leak_draft());
        assert!(list.is_empty());

        service.submit(&mut draft, &mut list).await.unwrap();

        assert_eq!(api.create_calls(), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(&AnomalyId::from("x1")), Some(&created_leak()));
    }

    #[tokio::test]
    async fn test_server_rejection_surfaces_message() {
        let api = Arc::new(MockApi::new());
        api.push_create(Err(AppError::rejected(
            404,
            Some("Machine not found with id: 5".to_string()),
        )));
        let (service, session) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        let mut draft = leak_draft();
        let err = service.submit(&mut draft, &mut list).await.unwrap_err();

        assert_eq!(err.user_message(), "Machine not found with id: 5");
        assert!(session.token().await.is_some());
        assert_eq!(draft, leak_draft());
    }

    #[tokio::test]
    async fn test_idempotency_key_reused_across_retries() {
        let api = Arc::new(MockApi::new());
        api.push_create(Err(AppError::Network("timed out".to_string())));
        api.push_create(Ok(created_leak()));
        api.push_create(Ok(sample_anomaly("x2", "Noise")));
        let (service, _) = signed_in_service(&api).await;
        let service = service.with_idempotency_keys(true);

        let mut list = AnomalyList::new();
        let mut draft = leak_draft();
        let _ = service.submit(&mut draft, &mut list).await;
        service.submit(&mut draft, &mut list).await.unwrap();

        let mut next = leak_draft();
        service.submit(&mut next, &mut list).await.unwrap();

        let keys: Vec<_> = api
            .submissions()
            .iter()
            .map(|s| s.idempotency_key)
            .collect();
        assert!(keys.iter().all(Option::is_some));
        assert_eq!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
    }

    #[tokio::test]
    async fn test_photo_attached_with_generated_name() {
        let path = std::env::temp_dir().join(format!("anotrack-photo-{}.PNG", Uuid::new_v4()));
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();

        let api = Arc::new(MockApi::new());
        api.push_create(Ok(created_leak()));
        let (service, _) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        let mut draft = AnomalyDraft {
            photo: Some(PhotoAttachment::new(path.clone())),
            ..leak_draft()
        };
        service.submit(&mut draft, &mut list).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        let sent = api.submissions();
        let photo = sent[0].photo.as_ref().unwrap();
        assert!(photo.file_name.starts_with("anomaly_"));
        assert!(photo.file_name.ends_with(".png"));
        assert_eq!(photo.content_type, "image/png");
        assert_eq!(photo.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_unreadable_photo_blocks_submission() {
        let api = Arc::new(MockApi::new());
        let (service, _) = signed_in_service(&api).await;

        let mut list = AnomalyList::new();
        let mut draft = AnomalyDraft {
            photo: Some(PhotoAttachment::new("/no/such/photo.jpg")),
            ..leak_draft()
        };

        let err = service.submit(&mut draft, &mut list).await.unwrap_err();

        assert_eq!(err, AppError::validation(["photo"]));
        assert_eq!(api.create_calls(), 0);
    }
}
