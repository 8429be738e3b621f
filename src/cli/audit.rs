//! Audit subcommands.
//!
//! Decodes serialized audit-history blobs given inline or from a file.

use crate::audit::BlobEncoding;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Audit-history operations
#[derive(Subcommand, Debug)]
pub enum AuditCommand {
    /// Decode an audit-history blob
    Decode(AuditDecodeArgs),
}

/// Arguments for `audit decode`
#[derive(Args, Debug)]
pub struct AuditDecodeArgs {
    /// Blob text (hex by default); omit when using --file
    #[arg(value_name = "BLOB", conflicts_with = "file")]
    pub blob: Option<String>,

    /// Read raw blob bytes from a file instead
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Encoding of the inline blob text
    #[arg(long, value_enum, default_value = "hex")]
    pub encoding: BlobEncoding,
}
