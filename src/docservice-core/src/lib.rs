//! DocService Core Library
//!
//! Shared types for talking to a document service:
//! - Document model (payload, content type, metadata)
//! - Client connection configuration

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError};
pub use models::*;
