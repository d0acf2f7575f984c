use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod utils;

use commands::{hash_password, health, init_db};
use utils::env_paths::EnvPaths;

/// Journal CLI - operator tools for the learning journal server
#[derive(Parser)]
#[command(name = "jctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for the AUTH_PASSWORD setting
    HashPassword {
        /// Password to hash; read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Drop and recreate the journal database
    InitDb {
        /// Database file (defaults to DATABASE_PATH, then <DATA_PATH>/journal.db)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Load the sample entries
        #[arg(short, long)]
        sample: bool,
    },

    /// Check a running server's health
    Health {
        /// Base URL of the server
        #[arg(short, long, env = "JOURNAL_URL", default_value = "http://127.0.0.1:6543")]
        url: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::HashPassword { password } => {
            hash_password::execute(password)?;
        }
        Commands::InitDb { database, sample } => {
            let database = match database {
                Some(path) => path,
                None => EnvPaths::load()?.database_path(),
            };
            init_db::execute(database, sample).await?;
        }
        Commands::Health { url, format } => {
            health::execute(url, format).await?;
        }
    }

    Ok(())
}
