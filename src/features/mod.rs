pub mod admin;
pub mod anomalies;
pub mod auth;
pub mod catalog;
