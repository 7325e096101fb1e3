//! sql-console CLI - ad-hoc SQL console for SQLite, PostgreSQL and MySQL.

mod commands;
mod console;
mod output;

use clap::{Parser, Subcommand};
use sql_console::{ConsoleConfig, ConsoleError, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sql-console")]
#[command(about = "Ad-hoc SQL console for SQLite, PostgreSQL and MySQL")]
#[command(version)]
struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Connection descriptor (overrides DATABASE_URI)
    #[arg(long)]
    database_uri: Option<String>,

    /// SQLite file used when the descriptor is not a server URL
    #[arg(long)]
    sqlite_file: Option<PathBuf>,

    /// Schema searched when listing PostgreSQL tables and columns
    #[arg(long)]
    postgres_schema: Option<String>,

    /// Quote table and column names in generated INSERT statements
    #[arg(long)]
    quote_identifiers: bool,

    /// Output results as JSON to stdout (one-shot commands only)
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Interactive menu (default)
    Shell,

    /// List tables in the database
    Tables,

    /// List the columns of a table in ordinal order
    Columns {
        /// Table name
        table: String,
    },

    /// Print every row of a table
    Show {
        /// Table name
        table: String,
    },

    /// Run one or more SQL statements
    Exec {
        /// Statements, one per argument
        #[arg(required = true)]
        statements: Vec<String>,
    },

    /// Run a file of `;`-separated statements
    Batch {
        /// Path to the SQL file
        file: PathBuf,
    },

    /// Insert rows given as comma-separated value lines
    Insert {
        /// Table name
        table: String,

        /// Value lines, one row each (e.g. "7,3,49.99")
        #[arg(required = true)]
        values: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            info!("{} statement(s) failed", failures);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

/// Returns the number of failed statements.
async fn run() -> Result<usize, ConsoleError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ConsoleError::Config)?;

    let config = load_config(&cli)?;
    info!("Using configuration: {:?}", config);

    let command = cli.command.clone().unwrap_or(Commands::Shell);
    let interactive = matches!(command, Commands::Shell);

    let mut session = Session::open(&config).await?;
    if interactive {
        println!("Connected to {} database successfully.", session.kind());
    }

    let result = match command {
        Commands::Shell => console::run(&mut session).await.map(|()| 0),
        other => commands::run(&mut session, other, cli.output_json).await,
    };

    // Close on every path; a command error outranks a close error.
    let closed = session.close().await;
    if interactive {
        println!("Database connection closed.");
    }

    let failures = result?;
    closed?;
    Ok(failures)
}

/// Defaults, then the YAML file, then the environment, then CLI flags.
fn load_config(cli: &Cli) -> Result<ConsoleConfig, ConsoleError> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = ConsoleConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => ConsoleConfig::default(),
    };

    config.apply_env();

    if let Some(uri) = &cli.database_uri {
        config.database_uri = uri.clone();
    }
    if let Some(file) = &cli.sqlite_file {
        config.sqlite_file = file.clone();
    }
    if let Some(schema) = &cli.postgres_schema {
        config.postgres_schema = schema.clone();
    }
    if cli.quote_identifiers {
        config.quote_identifiers = true;
    }

    config.validate()?;
    Ok(config)
}

/// Logs go to stderr so stdout carries only console output.
fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().try_init().map_err(|e| e.to_string())
    } else {
        subscriber.try_init().map_err(|e| e.to_string())
    }
}
