//! Key-value store subcommands.

use crate::kv::ValueView;
use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Environment variable naming the default store file.
pub const DB_ENV_VAR: &str = "OPS_DEBUG_DB";

/// Key-value store inspection
#[derive(Subcommand, Debug)]
pub enum KvCommand {
    /// List buckets in the store
    Buckets(KvBucketsArgs),
    /// List keys in a bucket
    Keys(KvKeysArgs),
    /// Print one record
    Dump(KvDumpArgs),
}

/// Location of the store, shared by every `kv` subcommand.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Path to the key-value store file
    #[arg(long, value_name = "PATH", env = DB_ENV_VAR)]
    pub db: Option<PathBuf>,
}

impl StoreArgs {
    /// The store path, which may come from the flag, the environment or the
    /// config file.
    pub fn db_path(&self) -> Result<&Path> {
        self.db.as_deref().ok_or_else(|| {
            anyhow!("no store given: pass --db, set {DB_ENV_VAR}, or set `db` in the config file")
        })
    }
}

/// Arguments for `kv buckets`
#[derive(Args, Debug)]
pub struct KvBucketsArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for `kv keys`
#[derive(Args, Debug)]
pub struct KvKeysArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Bucket to list
    #[arg(value_name = "BUCKET")]
    pub bucket: String,
}

/// Arguments for `kv dump`
#[derive(Args, Debug)]
pub struct KvDumpArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Bucket holding the record
    #[arg(value_name = "BUCKET")]
    pub bucket: String,

    /// Record key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Treat KEY as hex
    #[arg(long)]
    pub key_hex: bool,

    /// How to present the value
    #[arg(long = "as", value_enum, default_value = "raw", value_name = "VIEW")]
    pub view: ValueView,
}
