//! pinecheck - Pinecone connectivity check
//!
//! Loads a Pinecone API key and index name from the environment
//! (optionally merged from a `.env` file), connects to the service,
//! resolves the index and prints its statistics.
//!
//! # Architecture
//!
//! - **core**: Domain logic (config, errors, service clients, prober)
//! - **cli**: clap adapter (commands, output formatting)

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::client::{MockService, PineconeClient, VectorService};
pub use crate::core::config::{Config, ResolveMode};
pub use crate::core::error::{ProbeError, Result};
pub use crate::core::prober::{probe, run};
pub use crate::core::services::Services;
pub use crate::core::types::*;
