//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command. Handlers write to a caller-supplied sink so
//! tests can capture output.

pub mod check;
pub mod completions;
pub mod config;
pub mod indexes;
pub mod setup;

// Re-export argument types for use in mod.rs
pub use check::CheckArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use indexes::ListIndexesArgs;
pub use setup::SetupArgs;
