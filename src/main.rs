//! jiraserver - Jira Server provider CLI
//!
//! Drives the resource adapters from JSON files: resource configuration in,
//! resource state out.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jiraserver_provider::config::{validate_config, ProviderConfig};
use jiraserver_provider::Provider;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Manage Jira Server permission schemes, grants, roles, groups, issue types and screens
#[derive(Parser, Debug)]
#[command(name = "jiraserver")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/jiraserver/provider.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported resource types
    Resources,

    /// Check the provider configuration without contacting the server
    Validate,

    /// Create a resource from a JSON configuration
    Create {
        /// Resource type (e.g. jiraserver_group)
        resource: String,

        /// Resource configuration (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the new state (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Refresh a stored state from the server
    Read {
        resource: String,

        /// Stored state (JSON)
        #[arg(short, long)]
        state: PathBuf,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Apply a new configuration to an existing resource
    Update {
        resource: String,

        #[arg(short, long)]
        state: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete the resource a stored state points to
    Delete {
        resource: String,

        #[arg(short, long)]
        state: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = jiraserver_provider::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ProviderConfig::load_or_env(cli.config.as_deref())
        .context("Failed to load provider configuration")?;

    match cli.command {
        Commands::Resources => {
            let provider = Provider::configure(&config)?;
            for name in provider.resource_types() {
                println!("{}", name);
            }
        }

        Commands::Validate => match validate_config(&config) {
            Ok(()) => println!("Configuration is valid"),
            Err(errors) => {
                for error in &errors {
                    eprintln!("  {}", error);
                }
                anyhow::bail!("{} configuration error(s)", errors.len());
            }
        },

        Commands::Create {
            resource,
            input,
            out,
        } => {
            let provider = Provider::configure(&config)?;
            let config = read_json(&input)?;
            let state = provider.resource(&resource)?.create_json(config).await?;
            write_state(&state, out.as_deref())?;
        }

        Commands::Read {
            resource,
            state,
            out,
        } => {
            let provider = Provider::configure(&config)?;
            let stored = read_json(&state)?;
            let state = provider.resource(&resource)?.read_json(stored).await?;
            write_state(&state, out.as_deref())?;
        }

        Commands::Update {
            resource,
            state,
            input,
            out,
        } => {
            let provider = Provider::configure(&config)?;
            let stored = read_json(&state)?;
            let config = read_json(&input)?;
            let state = provider
                .resource(&resource)?
                .update_json(stored, config)
                .await?;
            write_state(&state, out.as_deref())?;
        }

        Commands::Delete { resource, state } => {
            let provider = Provider::configure(&config)?;
            let stored = read_json(&state)?;
            provider.resource(&resource)?.delete_json(stored).await?;
            eprintln!("Deleted {}", resource);
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Only reached after the operation succeeded, so a failure never
/// overwrites the previous state file.
fn write_state(state: &Value, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    match out {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
