//! Client workflow for the ANOTRACK industrial anomaly tracker.
//!
//! Holds the signed-in session, drives the bloc and machine selection
//! cascade, and submits anomaly reports to the REST backend. Every
//! operation reports failures as one of the four [`AppError`] kinds.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::config::{ApiConfig, Config};
pub use crate::core::error::{AppError, Result};
pub use crate::core::http::ApiClient;
