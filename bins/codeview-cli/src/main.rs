mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeview_common::config::Config;
use codeview_pipeline::{Executor, PlagiarismAnalyzer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codeview-cli")]
#[command(about = "Codeview CLI - Run and review interview submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a source file in the remote sandbox
    Run {
        /// Source file to execute
        #[arg(short, long)]
        file: PathBuf,

        /// Language (inferred from the file extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// File whose contents are fed to the program's stdin
        #[arg(short, long)]
        stdin: Option<PathBuf>,
    },

    /// Check a source file for plagiarism
    Analyze {
        /// Source file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Language (inferred from the file extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Interview question title
        #[arg(short, long)]
        title: String,

        /// Interview question description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List supported languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            language,
            stdin,
        } => {
            let config = Config::from_env().context("Invalid configuration")?;
            let executor = Executor::from_settings(&config.sandbox)
                .context("Failed to build sandbox client")?;
            commands::run_code(&executor, &file, language.as_deref(), stdin.as_deref()).await?;
        }
        Commands::Analyze {
            file,
            language,
            title,
            description,
        } => {
            let config = Config::from_env().context("Invalid configuration")?;
            let analyzer = PlagiarismAnalyzer::from_settings(config.model.as_ref())
                .context("Failed to build model client")?;
            commands::analyze_code(&analyzer, &file, language.as_deref(), &title, &description)
                .await?;
        }
        Commands::Languages => {
            commands::list_languages();
        }
    }

    Ok(())
}
