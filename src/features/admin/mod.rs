pub mod clients;
pub mod dtos;
pub mod services;

pub use clients::AdminApi;
pub use services::AdminService;
