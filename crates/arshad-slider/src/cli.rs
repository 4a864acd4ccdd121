//! Command-line interface definitions for arshad-slider.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `arshad-slider` binary.
#[derive(Parser, Debug)]
#[command(
    name = "arshad-slider",
    about = "Build, preview and hydrate carousel sliders from form snapshots",
    version
)]
pub struct Cli {
    /// Logging controls shared across workspace binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the configuration JSON a form produces.
    Config(FormArgs),
    /// Build the slider structure in memory and print it as HTML.
    Preview(PreviewArgs),
    /// Print the default form as RON.
    Defaults,
}

/// Form input shared by commands.
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// RON form snapshot; missing fields take their default values.
    #[arg(long, value_name = "PATH")]
    pub form: PathBuf,
}

/// Arguments for the `preview` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Form input.
    #[command(flatten)]
    pub form: FormArgs,

    /// Run a hydration scan over the preview and print the resolved options.
    #[arg(long)]
    pub hydrate: bool,

    /// Fixed wrapper suffix instead of a random one.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(0..10_000))]
    pub suffix: Option<u32>,
}
