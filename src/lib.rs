//! Intake: fixed-schema survey collection and export.
//!
//! Collects survey submissions over HTTP, persists them in a single
//! denormalized SQLite table (one row per response, one column per answer),
//! and re-exposes them as JSON or CSV.
//!
//! # Architecture
//!
//! - [`core`]: store handle, database access, schema definitions, error taxonomy
//! - [`plugins`]: response persistence and CSV export over the core store
//! - [`http`]: axum transport wiring the store to routes
//!
//! Responses are write-once: a submission is inserted with a store-assigned
//! id and timestamp, then only ever read back. No update or delete
//! operation exists anywhere in the crate.
//!
//! # Examples
//!
//! ```bash
//! # Create the data directory and responses table
//! intake init
//!
//! # Serve the HTTP API
//! intake serve --bind 127.0.0.1:3000
//!
//! # Dump all responses as JSON
//! intake list
//!
//! # Export everything as CSV
//! intake export --out responses.csv
//! ```

pub mod core;
pub mod http;
pub mod plugins;

use crate::core::error::IntakeError;
use crate::core::store::Store;
use crate::plugins::{export, responses};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[clap(
    name = "intake",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fixed-schema survey intake and export service"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data directory and responses table
    Init {
        /// Data directory (defaults to ./intake_data, or INTAKE_DATA_DIR)
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Start the HTTP listener
    Serve {
        /// Data directory (defaults to ./intake_data, or INTAKE_DATA_DIR)
        #[clap(short, long)]
        dir: Option<PathBuf>,
        /// Bind address (also INTAKE_HTTP_BIND; defaults to 127.0.0.1:3000)
        #[clap(long)]
        bind: Option<String>,
    },
    /// Print all responses as JSON, most recent first
    List {
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print one response as JSON
    Show {
        /// Response id
        id: i64,
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Export responses as CSV (all of them, or a single id)
    Export {
        /// Export only this response
        #[clap(long)]
        id: Option<i64>,
        /// Write to a file instead of stdout
        #[clap(long)]
        out: Option<PathBuf>,
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Print subsystem schema descriptors as JSON
    Schema {
        /// Limit output to one subsystem
        #[clap(long)]
        subsystem: Option<String>,
    },
    /// Print the version
    Version,
}

fn data_root(dir: Option<PathBuf>) -> Result<PathBuf, IntakeError> {
    match dir {
        Some(d) => Ok(d),
        None => match std::env::var("INTAKE_DATA_DIR") {
            Ok(v) => Ok(PathBuf::from(v)),
            Err(_) => Ok(std::env::current_dir()?.join("intake_data")),
        },
    }
}

pub fn run() -> Result<(), IntakeError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Init { dir } => {
            let root = data_root(dir)?;
            let store = Store::open(&root)?;
            println!(
                "{} responses database ready at {}",
                "✓".green().bold(),
                store.db_path().display()
            );
            Ok(())
        }
        Command::Serve { dir, bind } => {
            let root = data_root(dir)?;
            let store = Arc::new(Store::open(&root)?);
            let bind = bind
                .or_else(|| std::env::var("INTAKE_HTTP_BIND").ok())
                .unwrap_or_else(|| DEFAULT_BIND.to_string());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(http::serve(store, &bind))
        }
        Command::List { dir } => {
            let store = Store::open(&data_root(dir)?)?;
            let rows = responses::list_all(&store)?;
            println!("{}", serde_json::to_string_pretty(&rows).unwrap());
            Ok(())
        }
        Command::Show { id, dir } => {
            let store = Store::open(&data_root(dir)?)?;
            let row = responses::get_by_id(&store, id)?;
            println!("{}", serde_json::to_string_pretty(&row).unwrap());
            Ok(())
        }
        Command::Export { id, out, dir } => {
            let store = Store::open(&data_root(dir)?)?;
            let csv = match id {
                Some(id) => export::export_one(&store, id)?,
                None => export::export_all(&store)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("{} CSV written to {}", "✓".green().bold(), path.display());
                }
                None => println!("{}", csv),
            }
            Ok(())
        }
        Command::Schema { subsystem } => {
            let mut schemas = std::collections::BTreeMap::new();
            schemas.insert("responses", responses::schema());
            schemas.insert("export", export::schema());

            let output = match subsystem {
                Some(sub) => schemas
                    .get(sub.as_str())
                    .cloned()
                    .unwrap_or(serde_json::json!({ "error": "subsystem not found" })),
                None => serde_json::json!({
                    "schema_version": "1.0.0",
                    "subsystems": schemas
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            Ok(())
        }
    }
}
