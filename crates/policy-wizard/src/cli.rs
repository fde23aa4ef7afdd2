use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::cmd::{self, catalog::CatalogCommand, run::RunArgs};
use crate::{config, logging};

#[derive(Parser, Debug)]
#[command(
    name = "policy-wizard",
    about = "Draft a project security policy by answering a short questionnaire",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long = "config", value_name = "config.toml", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire and write the policy report
    Run(RunArgs),
    /// Inspect and validate question catalogs
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    logging::init(cli.verbose, config.log_filter.as_deref());

    match cli.command {
        Commands::Run(args) => cmd::run::run(args, &config),
        Commands::Catalog(command) => cmd::catalog::run(command, &config),
    }
}
