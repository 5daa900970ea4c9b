//! CLI Adapter.

mod draft;
mod prompter;
mod submit;
mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{AppError, FormKind};

#[derive(Parser)]
#[command(name = "sovseas")]
#[command(version)]
#[command(
    about = "Draft, validate, and submit Sovereign Seas campaigns and projects",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./sovseas.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a draft template for a campaign or project
    #[clap(visible_alias = "i")]
    Init {
        /// Form kind (campaign, project)
        kind: String,
        /// Draft path (defaults to ./<kind>.toml)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// List the sections and fields of a form
    #[clap(visible_alias = "sc")]
    Schema {
        /// Form kind (campaign, project)
        kind: String,
    },
    /// Validate a draft and report field errors
    #[clap(visible_alias = "v")]
    Validate {
        /// Form kind (campaign, project)
        kind: String,
        /// Draft file (.toml, .json, .yaml)
        draft: PathBuf,
        /// Only validate one section
        #[arg(short = 's', long)]
        section: Option<String>,
    },
    /// Show the metadata and contract call a submission would send
    #[clap(visible_alias = "p")]
    Preview {
        /// Form kind (campaign, project)
        kind: String,
        /// Draft file (.toml, .json, .yaml)
        draft: PathBuf,
    },
    /// Upload media and create the campaign or project on chain
    #[clap(visible_alias = "s")]
    Submit {
        /// Form kind (campaign, project)
        kind: String,
        /// Draft file (.toml, .json, .yaml)
        draft: PathBuf,
        /// Validate and preview without touching the network
        #[arg(long)]
        dry_run: bool,
    },
    /// Fill in a form interactively, one section at a time
    #[clap(visible_alias = "w")]
    Wizard {
        /// Form kind (campaign, project)
        kind: String,
        /// Where to save the finished draft (defaults to ./<kind>.toml)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        /// Start from an existing draft
        #[arg(long)]
        from: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Init { kind, output } => {
            parse_kind(&kind).and_then(|kind| draft::run_init(kind, output, config)).map(|_| 0)
        }
        Commands::Schema { kind } => parse_kind(&kind).map(draft::run_schema).map(|_| 0),
        Commands::Validate { kind, draft, section } => {
            parse_kind(&kind).and_then(|kind| draft::run_validate(kind, &draft, section.as_deref()))
        }
        Commands::Preview { kind, draft } => {
            parse_kind(&kind).and_then(|kind| draft::run_preview(kind, &draft, config)).map(|_| 0)
        }
        Commands::Submit { kind, draft, dry_run } => {
            parse_kind(&kind).and_then(|kind| submit::run_submit(kind, &draft, dry_run, config))
        }
        Commands::Wizard { kind, output, from } => parse_kind(&kind)
            .and_then(|kind| wizard::run_wizard(kind, output, from.as_deref()))
            .map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_kind(value: &str) -> Result<FormKind, AppError> {
    value.parse()
}
