//! Configuration loading: .env files, TOML files and env overrides
//!
//! These tests mutate the process environment and run serially.

use crate::common::clear_pinecone_env;
use pinecheck::core::config::{load_env_file, Config, ResolveMode};
use pinecheck::core::xdg::XdgDirs;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

/// XDG dirs rooted in an empty temp dir (no config file)
fn empty_xdg(temp: &TempDir) -> XdgDirs {
    XdgDirs::with_config_dir(temp.path().join("config"))
}

#[test]
#[serial]
fn test_env_file_populates_environment() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let env_path = temp.path().join(".env");
    fs::write(
        &env_path,
        "PINECONE_API_KEY=from-dotenv\nPINECONE_INDEX=dotenv-index\n",
    )
    .unwrap();

    let loaded = load_env_file(&env_path, true).unwrap();
    assert_eq!(loaded.as_deref(), Some(env_path.as_path()));

    let config = Config::load_with_xdg(&empty_xdg(&temp)).unwrap();
    assert_eq!(config.pinecone.api_key, "from-dotenv");
    assert_eq!(config.probe.index_name, "dotenv-index");

    clear_pinecone_env();
}

#[test]
#[serial]
fn test_process_env_wins_over_env_file() {
    clear_pinecone_env();
    env::set_var("PINECONE_INDEX", "from-process");
    let temp = TempDir::new().unwrap();
    let env_path = temp.path().join(".env");
    fs::write(&env_path, "PINECONE_INDEX=from-dotenv\n").unwrap();

    load_env_file(&env_path, false).unwrap();
    let config = Config::load_with_xdg(&empty_xdg(&temp)).unwrap();
    assert_eq!(config.probe.index_name, "from-process");

    clear_pinecone_env();
}

#[test]
#[serial]
fn test_missing_env_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.env");

    assert!(load_env_file(&path, false).unwrap().is_none());

    let err = load_env_file(&path, true).unwrap_err();
    assert!(err.is_config());
}

#[test]
#[serial]
fn test_missing_values_load_fine() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();

    let config = Config::load_with_xdg(&empty_xdg(&temp)).unwrap();
    assert!(config.pinecone.api_key.is_empty());
    assert!(config.require_api_key().is_err());
    assert!(config.require_index_name().is_err());
}

#[test]
#[serial]
fn test_toml_file_then_env_override() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
            [pinecone]
            controller_host = "http://localhost:5080"
            timeout_sec = 20

            [probe]
            index_name = "toml-index"
            resolve = "lazy"
        "#,
    )
    .unwrap();
    env::set_var("PINECONE_API_KEY", "env-key");
    env::set_var("PINECONE_INDEX", "env-index");

    let config = Config::load_with_xdg(&XdgDirs::with_config_dir(&config_dir)).unwrap();
    assert_eq!(config.pinecone.api_key, "env-key");
    assert_eq!(config.probe.index_name, "env-index");
    assert_eq!(config.pinecone.controller_host, "http://localhost:5080");
    assert_eq!(config.pinecone.timeout_sec, Some(20));
    assert_eq!(config.probe.resolve, ResolveMode::Lazy);

    clear_pinecone_env();
}

#[test]
#[serial]
fn test_invalid_toml_is_config_error() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("broken.toml");
    fs::write(&file, "[pinecone\ncontroller_host = ").unwrap();
    env::set_var("PINECHECK_CONFIG_FILE", &file);

    let err = Config::load_with_xdg(&empty_xdg(&temp)).unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.exit_code(), 2);

    clear_pinecone_env();
}

/// A bad line in the optional default .env is skipped; later keys load
#[test]
#[serial]
fn test_default_env_file_skips_bad_lines() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let env_path = temp.path().join(".env");
    fs::write(
        &env_path,
        "PINECONE_API_KEY=first\nthis line has no equals\nPINECONE_INDEX=second\n",
    )
    .unwrap();

    let loaded = load_env_file(&env_path, false).unwrap();
    assert_eq!(loaded.as_deref(), Some(env_path.as_path()));
    assert_eq!(env::var("PINECONE_API_KEY").as_deref(), Ok("first"));
    assert_eq!(env::var("PINECONE_INDEX").as_deref(), Ok("second"));

    clear_pinecone_env();
}

/// The lenient path still leaves existing variables alone
#[test]
#[serial]
fn test_default_env_file_keeps_process_values() {
    clear_pinecone_env();
    env::set_var("PINECONE_INDEX", "from-process");
    let temp = TempDir::new().unwrap();
    let env_path = temp.path().join(".env");
    fs::write(&env_path, "bad line\nPINECONE_INDEX=from-dotenv\n").unwrap();

    load_env_file(&env_path, false).unwrap();
    assert_eq!(env::var("PINECONE_INDEX").as_deref(), Ok("from-process"));

    clear_pinecone_env();
}

/// An explicitly named .env with a bad line is a config error
#[test]
#[serial]
fn test_explicit_env_file_malformed() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let env_path = temp.path().join("custom.env");
    fs::write(&env_path, "this line has no equals\n").unwrap();

    let err = load_env_file(&env_path, true).unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.exit_code(), 2);

    clear_pinecone_env();
}

/// An empty index host in TOML is a config mistake, not a connection failure
#[test]
#[serial]
fn test_toml_empty_index_host_rejected() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[pinecone]\nindex_host = \"\"\n",
    )
    .unwrap();

    let err = Config::load_with_xdg(&XdgDirs::with_config_dir(&config_dir)).unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.exit_code(), 2);
}

/// An empty PINECONE_INDEX_HOST clears the TOML value instead
#[test]
#[serial]
fn test_empty_index_host_env_clears_toml() {
    clear_pinecone_env();
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[pinecone]\nindex_host = \"\"\n",
    )
    .unwrap();
    env::set_var("PINECONE_INDEX_HOST", "");

    let config = Config::load_with_xdg(&XdgDirs::with_config_dir(&config_dir)).unwrap();
    assert!(config.pinecone.index_host.is_none());

    clear_pinecone_env();
}
