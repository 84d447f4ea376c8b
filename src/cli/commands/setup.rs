//! Setup-check command - verify the configured index exists
//!
//! Read-only: a missing index is reported together with the settings to
//! create it with, but nothing is created.

use crate::cli::output::{colors, format_count, format_fullness, print_warning};
use crate::cli::OutputFormat;
use crate::core::error::{ProbeError, Result};
use crate::core::services::Services;
use crate::core::types::{IndexHandle, IndexStats};
use clap::Args;
use serde::Serialize;
use std::io::Write;

/// Console where indexes are created by hand
pub const CONSOLE_URL: &str = "https://app.pinecone.io";

/// Arguments for the setup-check command
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Dimension to suggest when the index is missing
    #[arg(long, default_value_t = 1536)]
    pub dimension: u32,

    /// Metric to suggest when the index is missing
    #[arg(long, default_value = "cosine")]
    pub metric: String,
}

impl Default for SetupArgs {
    fn default() -> Self {
        Self {
            dimension: 1536,
            metric: "cosine".to_string(),
        }
    }
}

/// Settings to create a missing index with
#[derive(Debug, Serialize)]
pub struct CreateInstructions {
    pub console: String,
    pub name: String,
    pub dimension: u32,
    pub metric: String,
}

/// Setup-check response
#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub index: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IndexStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<CreateInstructions>,
}

/// Execute the setup-check command
///
/// Returns `QueryFailure` after printing instructions when the index
/// does not exist.
pub async fn execute<W: Write>(
    args: &SetupArgs,
    services: &Services,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let name = services.config.require_index_name()?;

    if format == OutputFormat::Human {
        writeln!(out, "Checking for index: {}", colors::label(name))?;
    }

    let indexes = services.client.list_indexes().await?;
    let found = indexes.iter().find(|i| i.name == name);
    let exists = found.is_some();

    if let Some(desc) = found {
        if !desc.status.ready {
            print_warning(&format!(
                "index '{name}' is not ready (state: {})",
                desc.status.state
            ));
        }
    }

    let response = if let Some(desc) = found {
        // Host comes from the list entry
        let host = services
            .config
            .pinecone
            .index_host
            .clone()
            .unwrap_or_else(|| desc.host.clone());
        let handle = IndexHandle::resolved(name, host);
        let stats = services.client.describe_stats(&handle).await?;
        SetupResponse {
            index: name.to_string(),
            exists: true,
            stats: Some(stats),
            create: None,
        }
    } else {
        SetupResponse {
            index: name.to_string(),
            exists: false,
            stats: None,
            create: Some(CreateInstructions {
                console: CONSOLE_URL.to_string(),
                name: name.to_string(),
                dimension: args.dimension,
                metric: args.metric.clone(),
            }),
        }
    };

    match format {
        OutputFormat::Human => print_human(&response, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
    }

    if exists {
        Ok(())
    } else {
        Err(ProbeError::QueryFailure(format!(
            "index '{name}' does not exist"
        )))
    }
}

fn print_human<W: Write>(response: &SetupResponse, out: &mut W) -> Result<()> {
    if let Some(stats) = &response.stats {
        writeln!(
            out,
            "{}",
            colors::success(&format!("✅ Index \"{}\" exists", response.index))
        )?;
        writeln!(out)?;
        writeln!(out, "{}", colors::label("Index Statistics:"))?;
        writeln!(out, "   Dimensions: {}", stats.dimension)?;
        writeln!(out, "   Index fullness: {}", format_fullness(stats.index_fullness))?;
        writeln!(out, "   Namespaces: {}", stats.namespace_count())?;
        writeln!(
            out,
            "   Total vectors: {}",
            colors::number(&format_count(stats.total_vector_count))
        )?;
    }

    if let Some(create) = &response.create {
        writeln!(
            out,
            "{}",
            colors::warning(&format!("⚠️  Index \"{}\" does not exist", response.index))
        )?;
        writeln!(out)?;
        writeln!(out, "To create an index:")?;
        writeln!(out, "1. Go to {}", create.console)?;
        writeln!(out, "2. Create a new index with the following settings:")?;
        writeln!(out, "   - Name: {}", create.name)?;
        writeln!(out, "   - Dimensions: {}", create.dimension)?;
        writeln!(out, "   - Metric: {}", create.metric)?;
    }

    Ok(())
}
