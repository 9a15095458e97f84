//! The `tasktrack` library crate.
//!
//! Core business logic, domain models, authentication, routing
//! configuration, and error handling for the task-tracking API. The main
//! binary (`main.rs`) wires a Postgres-backed store into [`state::AppState`]
//! and runs the server; the integration tests wire in the in-memory store
//! instead.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
