//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::{redact_key, Config};
use crate::core::error::Result;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::io::Write;

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub api_key: String,
    pub index_name: String,
    pub controller_host: String,
    pub index_host: Option<String>,
    pub api_version: String,
    pub timeout_sec: Option<u64>,
    pub resolve: String,
}

impl ConfigResponse {
    pub fn from_config(config: &Config) -> Self {
        Self {
            config_file: XdgDirs::new().config_file().to_string_lossy().into_owned(),
            api_key: redact_key(&config.pinecone.api_key),
            index_name: config.probe.index_name.clone(),
            controller_host: config.pinecone.controller_host.clone(),
            index_host: config.pinecone.index_host.clone(),
            api_version: config.pinecone.api_version.clone(),
            timeout_sec: config.pinecone.timeout_sec,
            resolve: config.probe.resolve.to_string(),
        }
    }
}

/// Execute the config command
pub fn execute<W: Write>(
    _args: &ConfigArgs,
    config: &Config,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let response = ConfigResponse::from_config(config);

    match format {
        OutputFormat::Human => {
            writeln!(out, "Configuration:")?;
            writeln!(out, "  config_file: {}", response.config_file)?;
            writeln!(out, "  api_key: {}", response.api_key)?;
            if response.index_name.is_empty() {
                writeln!(out, "  index_name: <unset>")?;
            } else {
                writeln!(out, "  index_name: {}", response.index_name)?;
            }
            writeln!(out, "  controller_host: {}", response.controller_host)?;
            if let Some(host) = &response.index_host {
                writeln!(out, "  index_host: {host}")?;
            }
            writeln!(out, "  api_version: {}", response.api_version)?;
            match response.timeout_sec {
                Some(t) => writeln!(out, "  timeout_sec: {t}")?,
                None => writeln!(out, "  timeout_sec: client default")?,
            }
            writeln!(out, "  resolve: {}", response.resolve)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
