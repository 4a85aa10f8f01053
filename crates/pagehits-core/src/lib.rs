//! pagehits core: the in-memory page registry, page model, and error surface.
//!
//! This crate owns every counter mutation. It carries no transport, runtime,
//! or logging dependencies; the HTTP server consumes it through the four
//! registry operations (`list`, `create`, `hits`, `hit`).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Failed lookups and bad input surface as `PageHitsError` so a bad request
//! can never crash the process or corrupt the registry.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod page;
pub mod registry;

/// Shared result type.
pub use error::{PageHitsError, Result};
pub use page::{Page, PageId};
pub use registry::PageRegistry;
