//! lampack - AWS Lambda deployment package builder.
//!
//! Packages a Python project into a single zip ready for upload:
//! - fresh virtualenv so dependency resolution never touches ambient state
//! - pip installs straight into the staging tree
//! - shared library files merged in, project files on top
//! - deterministic zip written to OUTPUT_FILEPATH
//!
//! Normally exec'd by Terraform with configuration in the environment.

use anyhow::Result;
use clap::{Parser, Subcommand};

use lampack::commands;
use lampack::config::Config;

#[derive(Parser)]
#[command(name = "lampack")]
#[command(about = "AWS Lambda deployment package builder")]
#[command(after_help = "CONFIGURATION (environment variables):\n  \
    PROJECT_PATH       directory of project sources (required)\n  \
    OUTPUT_FILEPATH    where the archive is written (required)\n  \
    REQUIREMENTS_FILE  dependency manifest; 'none' skips the install\n  \
    LIB_PATH           shared library directory; 'null' skips the merge\n  \
    PYTHON             interpreter override (default: python3 on PATH)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the deployment package (default when no subcommand is given)
    Build,

    /// Run preflight checks (verify the host before building)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show resolved configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let config = Config::from_env()?;
            commands::cmd_build(&config)?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(strict)?;
        }

        Commands::Show { what } => {
            let config = Config::from_env()?;
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
