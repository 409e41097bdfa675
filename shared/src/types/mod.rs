//! Type definitions shared by the API layer
//!
//! - `response` - Health check response

pub mod response;

pub use response::{HealthResponse, HealthStatus};
