//! Completions command - generate shell completion scripts

use crate::cli::Cli;
use crate::core::error::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::Write;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the completions command
pub fn execute<W: Write>(args: &CompletionsArgs, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, out);
    Ok(())
}
