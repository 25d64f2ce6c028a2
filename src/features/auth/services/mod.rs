mod auth_service;
mod session_store;

pub use auth_service::AuthService;
pub use session_store::SessionStore;
