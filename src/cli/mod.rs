//! # CLI Module
//!
//! Command-line surface of the `apidocs-gen` binary.
//!
//! ## Commands
//!
//! ### `build`
//!
//! Run the whole pipeline and write the ordered group tree as JSON:
//!
//! ```bash
//! apidocs-gen build --input _data/vector_pro_endpoints --config _config.yml --output api_groups.json
//! ```
//!
//! Options:
//! - `--input <PATH>` - Directory of scanned endpoint files, or a single file (required)
//! - `--config <FILE>` - Site configuration (YAML, or TOML by extension)
//! - `--output <FILE>` - Write to a file instead of stdout
//! - `--pretty` - Pretty-print the JSON
//!
//! A description conflict between inputs exits non-zero and prints both
//! descriptions.
//!
//! ### `order`
//!
//! Order any data collection with a named `ordered_data` configuration:
//!
//! ```bash
//! apidocs-gen order --input _data/products.yml --name products --config _config.yml
//! ```
//!
//! ### `inspect`
//!
//! Print one line per group, subgroup and endpoint:
//!
//! ```bash
//! apidocs-gen inspect --input _data/vector_pro_endpoints
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use apidocs::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, summarize, Cli, Commands};
