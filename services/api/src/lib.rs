//! Task tracker API service
//!
//! Exposes the router and application state so integration tests and the
//! client crate can run the service in-process.

pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod stores;
pub mod validation;
