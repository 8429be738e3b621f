//! CLI command definitions for ops-debug
//!
//! The command tree is defined with clap's derive macros. Before the real
//! parse, flags receive defaults from the configuration document (see
//! [`crate::config`]).

pub mod audit;
pub mod base58;
pub mod config_cmd;
pub mod kv;

use crate::config::{
    AppliedDefault, CONFIG_ENV_VAR, ConfigLoader, ConfigPaths, ConfigResolver, ConfigTier,
    apply_config_defaults,
};
use crate::format::OutputFormat;
use anyhow::Result;
use audit::AuditCommand;
use base58::Base58Command;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use config_cmd::ConfigCommand;
use kv::KvCommand;
use std::ffi::OsString;
use std::path::PathBuf;

/// Operator debug utilities
#[derive(Parser, Debug)]
#[command(name = "ops-debug", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode audit-history blobs
    #[command(subcommand)]
    Audit(AuditCommand),

    /// Inspect the embedded key-value store
    #[command(subcommand)]
    Kv(KvCommand),

    /// Convert between hex and Base58Check
    #[command(subcommand)]
    Base58(Base58Command),

    /// Inspect configuration lookups
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// A parsed command line together with the configuration that shaped it.
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub resolver: ConfigResolver,
    /// The config file that was loaded and where it was found.
    pub config_source: Option<(PathBuf, ConfigTier)>,
    pub applied: Vec<AppliedDefault>,
}

/// Parse the process arguments.
pub fn parse() -> Result<Invocation> {
    parse_from(std::env::args_os())
}

/// Parse `args` (including the binary name), discovering config files in
/// the default locations.
pub fn parse_from<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    parse_with_paths(args, &ConfigPaths::discover())
}

/// Parse `args` with explicit config discovery candidates.
///
/// Errors from clap (including `--help`) are returned as `clap::Error`
/// inside the `anyhow::Error` so the caller can let clap print them.
pub fn parse_with_paths<I, T>(args: I, paths: &ConfigPaths) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let explicit = config_path_hint(&args);
    let loader = ConfigLoader::load_with_paths(explicit.as_deref(), paths)?;

    let (command, applied) = apply_config_defaults(Cli::command(), loader.resolver());
    let matches = command.try_get_matches_from(&args)?;
    let cli = Cli::from_arg_matches(&matches)?;

    Ok(Invocation {
        cli,
        config_source: loader
            .source()
            .map(|(path, tier)| (path.to_path_buf(), tier)),
        resolver: loader.into_resolver(),
        applied,
    })
}

/// Read `--config` (or its environment variable) without validating the
/// rest of the command line.
fn config_path_hint(args: &[OsString]) -> Option<PathBuf> {
    lenient(Cli::command())
        .try_get_matches_from(args)
        .ok()?
        .try_get_one::<PathBuf>("config")
        .ok()
        .flatten()
        .cloned()
}

fn lenient(command: clap::Command) -> clap::Command {
    let names: Vec<String> = command
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect();
    names
        .iter()
        .fold(command.ignore_errors(true), |command, name| {
            command.mut_subcommand(name, lenient)
        })
}
