pub mod clients;
pub mod dtos;
pub mod model;
pub mod services;

pub use clients::AuthApi;
pub use model::{Role, Route, Session};
pub use services::{AuthService, SessionStore};
