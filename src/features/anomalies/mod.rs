pub mod clients;
pub mod dtos;
pub mod models;
pub mod services;

pub use clients::AnomalyApi;
pub use dtos::{Anomaly, AnomalyDraft, AnomalyId, AnomalyStatus, PhotoAttachment};
pub use models::AnomalyList;
pub use services::{AnomalyService, SubmissionService};
