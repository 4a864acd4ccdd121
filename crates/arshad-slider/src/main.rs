#![warn(missing_docs)]

//! Entry point for the `arshad-slider` binary.

mod cli;
mod commands;
mod error;

use std::process;

use clap::Parser;
use tracing::error;

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(out) => print!("{out}"),
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
async fn run() -> Result<String> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log);

    let out = match command {
        Commands::Config(args) => commands::config(&args.form)?,
        Commands::Preview(args) => commands::preview(&args).await?,
        Commands::Defaults => commands::defaults()?,
    };
    Ok(if out.ends_with('\n') { out } else { format!("{out}\n") })
}
