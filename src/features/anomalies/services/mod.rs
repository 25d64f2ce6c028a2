mod anomaly_service;
mod submission_service;

pub use anomaly_service::AnomalyService;
pub use submission_service::SubmissionService;
