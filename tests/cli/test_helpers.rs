//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Mock-backed services matching execute() signatures
//! - .env files for full runs

use crate::common::{mock_services, TEST_API_KEY, TEST_INDEX};
use pinecheck::core::client::MockService;
use pinecheck::core::config::Config;
use pinecheck::core::services::Services;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Services over a mock that knows `TEST_INDEX`
pub fn create_cli_test_services() -> (Services, Arc<MockService>) {
    mock_services(Config::new(TEST_API_KEY, TEST_INDEX))
}

/// Services over a mock, targeting `index_name`
pub fn create_cli_test_services_for(index_name: &str) -> (Services, Arc<MockService>) {
    mock_services(Config::new(TEST_API_KEY, index_name))
}

/// Write a .env file with the given lines
///
/// # Returns
/// TempDir holding the file (keep alive during test) and the file path
pub fn write_env_file(lines: &[&str]) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join(".env");
    std::fs::write(&path, lines.join("\n")).expect("Failed to write env file");
    (temp, path)
}
