//! Common library for the task tracker
//!
//! This crate provides functionality shared between the API service and the
//! client library: the JSON wire contract (requests and responses) and
//! database connectivity for the server side.

pub mod database;
pub mod error;
pub mod models;
