//! pinecheck CLI
//!
//! Checks that a Pinecone index is reachable and prints its statistics.
//!
//! # Examples
//!
//! ```bash
//! # Check the index named by PINECONE_INDEX (reads ./.env if present)
//! pinecheck
//!
//! # Same, as JSON
//! pinecheck check --format json
//!
//! # Verify the index exists and summarize it
//! pinecheck setup-check
//!
//! # List indexes visible to the key
//! pinecheck list-indexes
//! ```

use clap::Parser;
use pinecheck::cli::output::print_error;
use pinecheck::cli::{init_logging, run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    tracing::debug!("pinecheck {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        tracing::debug!(exit_code = e.exit_code(), "Command failed");
        print_error(&e.message());
        std::process::exit(e.exit_code());
    }
}
