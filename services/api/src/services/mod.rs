//! Business logic, one module per service

pub mod auth;
pub mod profile;
pub mod tasks;

pub use auth::AuthService;
pub use profile::ProfileService;
pub use tasks::TaskService;
