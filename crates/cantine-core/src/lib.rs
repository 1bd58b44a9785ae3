//! Shared web plumbing for the canteen service: health handlers,
//! request-id middleware, serde helpers, tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
