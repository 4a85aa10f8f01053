//! Top-level facade crate for pagehits.
//!
//! Re-exports the registry core and the server library so users can depend on a single crate.

pub mod core {
    pub use pagehits_core::*;
}

pub mod server {
    pub use pagehits_server::*;
}
