//! Service plumbing shared by Ovation services.
//!
//! Nothing in here knows about events, votes or recipients.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
