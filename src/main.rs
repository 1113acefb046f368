//! stow CLI - Command line interface for stowage
//!
//! Saves, reads and removes JSON records in the documents and cache
//! directories. Output is JSON so the tool can be scripted.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use stowage::{Directory, Roots, Storage, StoreConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stow")]
#[command(about = "A typed JSON object store for documents and cache directories")]
#[command(version)]
struct Cli {
    /// Override the documents directory
    #[arg(long)]
    documents_dir: Option<PathBuf>,

    /// Override the cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum DirectoryArg {
    Documents,
    Cache,
}

impl From<DirectoryArg> for Directory {
    fn from(arg: DirectoryArg) -> Self {
        match arg {
            DirectoryArg::Documents => Directory::Documents,
            DirectoryArg::Cache => Directory::Cache,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Save a JSON value under a name
    Save {
        /// Record name (file name inside the directory)
        name: String,
        /// JSON text, or "-" to read from stdin
        value: String,
        #[arg(short = 'D', long, default_value = "documents")]
        directory: DirectoryArg,
    },

    /// Read a record
    Read {
        name: String,
        #[arg(short = 'D', long, default_value = "documents")]
        directory: DirectoryArg,
    },

    /// Delete a record (no-op if it does not exist)
    Delete {
        name: String,
        #[arg(short = 'D', long, default_value = "documents")]
        directory: DirectoryArg,
    },

    /// Check whether a record exists
    Exists {
        name: String,
        #[arg(short = 'D', long, default_value = "documents")]
        directory: DirectoryArg,
    },

    /// Remove every entry in a directory
    Clear {
        #[arg(short = 'D', long, default_value = "documents")]
        directory: DirectoryArg,
        /// Required: confirm removal of everything in the directory
        #[arg(long)]
        yes: bool,
    },

    /// Show the resolved directory paths
    Paths,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let roots = config.roots();
    let storage = Storage::new(roots.clone());

    match cli.command {
        Commands::Save {
            name,
            value,
            directory,
        } => {
            let directory = Directory::from(directory);
            let text = if value == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                value
            };
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| anyhow::anyhow!("Invalid JSON value: {}", e))?;
            storage.save(&value, directory, &name)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "name": name,
                    "directory": directory
                }),
            );
        }

        Commands::Read { name, directory } => {
            let directory = Directory::from(directory);
            match storage.read::<serde_json::Value>(&name, directory)? {
                Some(value) => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "name": name,
                            "directory": directory,
                            "value": value
                        }),
                    );
                }
                None => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "error",
                            "message": format!("Record not found: {}", name)
                        }),
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Delete { name, directory } => {
            let directory = Directory::from(directory);
            storage.delete(&name, directory)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "name": name,
                    "directory": directory
                }),
            );
        }

        Commands::Exists { name, directory } => {
            let directory = Directory::from(directory);
            let exists = storage.file_exists(&name, directory)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "name": name,
                    "directory": directory,
                    "exists": exists
                }),
            );
        }

        Commands::Clear { directory, yes } => {
            let directory = Directory::from(directory);
            if !yes {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "error",
                        "message": format!("Refusing to clear {} without --yes", directory)
                    }),
                );
                std::process::exit(2);
            }
            let removed = storage.clear(directory)?;
            let items: Vec<_> = removed.iter().map(|p| p.display().to_string()).collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "directory": directory,
                    "count": items.len(),
                    "removed": items
                }),
            );
        }

        Commands::Paths => {
            let items: Vec<_> = Directory::ALL
                .iter()
                .map(|dir| match roots.resolve(*dir) {
                    Ok(path) => serde_json::json!({
                        "directory": dir,
                        "path": path.display().to_string()
                    }),
                    Err(e) => serde_json::json!({
                        "directory": dir,
                        "error": e.to_string()
                    }),
                })
                .collect();
            output(&cli.format, &serde_json::json!({ "directories": items }));
        }
    }

    Ok(())
}

/// Config file settings, overridden by command line flags
fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let file = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        // No platform config dir is fine when nothing needs to be read from it
        None => match StoreConfig::default_path() {
            Ok(path) => StoreConfig::load(path)?,
            Err(_) => StoreConfig::default(),
        },
    };
    let flags = StoreConfig {
        documents_dir: cli.documents_dir.clone(),
        cache_dir: cli.cache_dir.clone(),
    };
    Ok(file.merge(flags))
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            );
        }
    }
}
