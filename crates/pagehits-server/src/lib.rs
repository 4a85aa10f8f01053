//! pagehits server library entry.
//!
//! This crate wires the page registry behind the REST API, the request
//! middleware, metrics, and the dashboard into a single axum router. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
