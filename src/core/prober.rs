//! Connectivity prober
//!
//! Resolves the configured index through a connected session, writes a
//! confirmation line, then fetches and writes the index statistics.
//! Failures propagate unchanged; nothing is retried and a confirmation
//! line that was already written stays written.

use crate::core::client::{PineconeClient, VectorService};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{OutputFormat, ProbeReport};
use chrono::Utc;
use std::io::Write;

/// Confirmation line written once the index handle is resolved
pub fn confirmation_line(index_name: &str) -> String {
    format!("✅ Connected to: {index_name}")
}

/// Run the probe against an already connected session
///
/// Human format writes two lines (confirmation, stats). JSON format
/// writes a single document, and only on success.
pub async fn run<S, W>(
    config: &Config,
    service: &S,
    format: OutputFormat,
    out: &mut W,
) -> Result<ProbeReport>
where
    S: VectorService + ?Sized,
    W: Write,
{
    let index_name = config.require_index_name()?;

    tracing::debug!(index = index_name, resolve = %config.probe.resolve, "Resolving index");
    let handle = service.index(index_name).await?;

    if format == OutputFormat::Human {
        writeln!(out, "{}", confirmation_line(index_name))?;
        out.flush()?;
    }

    let stats = service.describe_stats(&handle).await?;

    let report = ProbeReport {
        index: index_name.to_string(),
        host: handle.host,
        stats,
        checked_at: Utc::now(),
    };

    match format {
        OutputFormat::Human => writeln!(out, "{}", report.stats)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    tracing::info!(
        index = index_name,
        total_vector_count = report.stats.total_vector_count,
        "Probe succeeded"
    );
    Ok(report)
}

/// Create a Pinecone session from `config` and run the probe
pub async fn probe<W: Write>(
    config: &Config,
    format: OutputFormat,
    out: &mut W,
) -> Result<ProbeReport> {
    let client = PineconeClient::connect(config)?;
    run(config, &client, format, out).await
}
