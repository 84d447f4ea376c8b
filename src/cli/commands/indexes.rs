//! List-indexes command - show indexes visible to the API key

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::core::services::Services;
use clap::Args;
use std::io::Write;

/// Arguments for the list-indexes command
#[derive(Args, Debug, Default)]
pub struct ListIndexesArgs {
    /// Only print index names
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Execute the list-indexes command
pub async fn execute<W: Write>(
    args: &ListIndexesArgs,
    services: &Services,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let indexes = services.client.list_indexes().await?;

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &indexes)?;
            writeln!(out)?;
        }
        OutputFormat::Human if args.quiet => {
            for index in &indexes {
                writeln!(out, "{}", index.name)?;
            }
        }
        OutputFormat::Human => {
            if indexes.is_empty() {
                writeln!(out, "No indexes found")?;
                return Ok(());
            }

            let width = indexes.iter().map(|i| i.name.len()).max().unwrap_or(4).max(4);
            writeln!(
                out,
                "{:<width$}  {:>9}  {:<10}  {}",
                "NAME", "DIMENSION", "METRIC", "STATE"
            )?;
            for index in &indexes {
                let dimension = index
                    .dimension
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let state = if index.status.ready {
                    colors::success(&index.status.state).to_string()
                } else {
                    colors::warning(&index.status.state).to_string()
                };
                writeln!(
                    out,
                    "{:<width$}  {:>9}  {:<10}  {}",
                    index.name, dimension, index.metric, state
                )?;
            }
        }
    }

    Ok(())
}
