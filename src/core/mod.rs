//! Core domain logic (transport-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (.env + TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Index handles, stats and reports
//! - **xdg**: XDG config file location
//! - **client**: Vector-service sessions (Pinecone HTTP, in-memory mock)
//! - **prober**: The connectivity check itself
//! - **services**: Unified service container

pub mod client;
pub mod config;
pub mod error;
pub mod prober;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ProbeError, Result};
pub use services::Services;
