use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{load_config, SiteConfig};
use crate::generator::generate;
use crate::model::Group;
use crate::ordering::order_data;
use crate::source::{load_endpoint_data, read_data_file};

/// Command-line interface for the API docs builder
#[derive(Parser)]
#[command(name = "apidocs-gen")]
#[command(about = "Build ordered API reference data from scanned endpoints", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the ordered group tree and write it as JSON
    Build {
        /// Scanned endpoint data: a directory of YAML/JSON files or one file
        #[arg(short, long)]
        input: PathBuf,

        /// Site configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Order an arbitrary data collection using a named `ordered_data` config
    Order {
        /// Data file (mapping or list) or directory of data files
        #[arg(short, long)]
        input: PathBuf,

        /// Key under `ordered_data` in the site configuration
        #[arg(short, long)]
        name: String,

        /// Site configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a one-line-per-endpoint summary of the built tree
    Inspect {
        /// Scanned endpoint data: a directory of YAML/JSON files or one file
        #[arg(short, long)]
        input: PathBuf,

        /// Site configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Execute the parsed command, writing results to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The input or configuration cannot be read or parsed
/// - Two inputs give a group or subgroup conflicting descriptions
/// - The output cannot be written
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)
}

/// Execute `command`, writing anything it prints to `out`.
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> anyhow::Result<()> {
    match command {
        Commands::Build {
            input,
            config,
            output,
            pretty,
        } => {
            let config = site_config(config.as_deref())?;
            let data = load_endpoint_data(input)?;
            let groups = generate(&data, &config)?;
            let json = to_json(&groups, *pretty)?;
            match output {
                Some(path) => {
                    fs::write(path, json + "\n")
                        .with_context(|| format!("Failed to write output: {}", path.display()))?;
                    info!(path = %path.display(), groups = groups.len(), "Wrote API groups");
                }
                None => writeln!(out, "{json}")?,
            }
            Ok(())
        }
        Commands::Order {
            input,
            name,
            config,
        } => {
            let config = site_config(config.as_deref())?;
            let data = load_order_input(input)?;
            let ordered = order_data(&data, &config.ordered_data_config(name));
            writeln!(out, "{}", to_json(&ordered, true)?)?;
            Ok(())
        }
        Commands::Inspect { input, config } => {
            let config = site_config(config.as_deref())?;
            let data = load_endpoint_data(input)?;
            let groups = generate(&data, &config)?;
            write!(out, "{}", summarize(&groups))?;
            Ok(())
        }
    }
}

/// Load the configuration file if one was given, then apply environment
/// overrides.
fn site_config(path: Option<&Path>) -> anyhow::Result<SiteConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn load_order_input(path: &Path) -> anyhow::Result<Value> {
    if path.is_dir() {
        Ok(Value::Object(load_endpoint_data(path)?))
    } else {
        read_data_file(path)
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Human-readable outline of a group tree.
///
/// ```text
/// Sites (sites) - 2 endpoints
///   (ungrouped)
///     GET /api/v1/vector/sites  sites-get-sites
///   WAF
///     GET /api/v1/vector/sites/{site}/waf/blocked-ips  sites-get-sites-site-waf-blocked-ips
/// ```
#[must_use]
pub fn summarize(groups: &[Group]) -> String {
    let mut text = String::new();
    for group in groups {
        text.push_str(&format!(
            "{} ({}) - {} endpoints\n",
            group.name,
            group.slug,
            group.endpoint_count()
        ));
        for subgroup in &group.subgroups {
            let label = if subgroup.name.is_empty() {
                "(ungrouped)"
            } else {
                subgroup.name.as_str()
            };
            text.push_str(&format!("  {label}\n"));
            for endpoint in &subgroup.endpoints {
                text.push_str(&format!(
                    "    {} {}  {}\n",
                    endpoint.method, endpoint.uri_display, endpoint.id
                ));
            }
        }
    }
    text
}
