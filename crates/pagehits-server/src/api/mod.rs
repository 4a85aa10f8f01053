//! REST API over the page registry (`/api/pages/...`).

pub mod pages;
