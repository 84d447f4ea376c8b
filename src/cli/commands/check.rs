//! Check command - connect to the index and print its statistics

use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::core::prober;
use crate::core::services::Services;
use clap::Args;
use std::io::Write;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {}

/// Execute the check command
pub async fn execute<W: Write>(
    _args: &CheckArgs,
    services: &Services,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    prober::run(&services.config, services.client.as_ref(), format, out).await?;
    Ok(())
}
