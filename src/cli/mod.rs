//! Command-line interface for ebi
//!
//! This module provides the main CLI structure and command handling. Repository
//! lists come from `--repo` values and/or lines piped on stdin.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::{ReportCounts, ReportLine, Reporter};

use commands::{RunContext, contents, engines, package};

/// Search files within GitHub repositories
#[derive(Parser)]
#[command(name = "ebi", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// GitHub personal access token. Generate one from https://github.com/settings/tokens
    #[arg(
        long,
        env = "GITHUB_PERSONAL_ACCESS_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Limit the number of repositories to search
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Output every result as a JSON line
    #[arg(long, global = true)]
    pub json: bool,

    /// Also report repositories without a match
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub log_level: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search within a repository's file
    Contents(contents::ContentsArgs),
    /// Search within the `package.json` file
    Package(package::PackageArgs),
    /// Search the `engines` field inside the `package.json` file
    #[command(name = "package:engines", alias = "package-engines")]
    PackageEngines(engines::EnginesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        setup_logging(self.log_level, self.quiet);

        let ctx = RunContext {
            token: self.token,
            limit: self.limit,
            json: self.json,
            verbose: self.verbose,
            config_path: self.config,
        };

        match self.command {
            Some(Commands::Contents(args)) => contents::execute(args, &ctx).await,
            Some(Commands::Package(args)) => package::execute(args, &ctx).await,
            Some(Commands::PackageEngines(args)) => engines::execute(args, &ctx).await,
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(level: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match level {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,hyper=warn,reqwest=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout carries results, so logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
