//! Test utilities for Ovation services.
//!
//! Import from `[dev-dependencies]` only.

pub mod admin;
pub mod phones;
