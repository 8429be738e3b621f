//! Subcommand execution.
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! around parsing, logging and error reporting.

use crate::audit::{self, AuditHistory};
use crate::base58;
use crate::cli::audit::{AuditCommand, AuditDecodeArgs};
use crate::cli::base58::Base58Command;
use crate::cli::config_cmd::ConfigCommand;
use crate::cli::kv::{KvCommand, KvDumpArgs};
use crate::cli::{Command, Invocation};
use crate::error::DebugError;
use crate::format::{self, OutputFormat};
use crate::kv::{KvStore, ValueView, display_key};
use anyhow::{Context, Result, bail};
use tracing::debug;

/// Run the parsed subcommand and return its output.
pub fn execute(invocation: &Invocation) -> Result<String> {
    let output = invocation.cli.format;
    match &invocation.cli.command {
        Command::Audit(cmd) => run_audit(cmd, output),
        Command::Kv(cmd) => run_kv(cmd, output),
        Command::Base58(cmd) => run_base58(cmd, output),
        Command::Config(cmd) => run_config(cmd, invocation, output),
    }
}

fn run_audit(cmd: &AuditCommand, output: OutputFormat) -> Result<String> {
    match cmd {
        AuditCommand::Decode(args) => {
            let history = read_history(args)?;
            Ok(format::format_history(&history, output))
        }
    }
}

fn read_history(args: &AuditDecodeArgs) -> Result<AuditHistory> {
    // BLOB is positional and never filled from config, so when present it
    // was typed on the command line and outranks a configured --file.
    let bytes = match (&args.blob, &args.file) {
        (Some(blob), _) => audit::decode_text(blob, args.encoding)?,
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("Failed reading blob file: {}", path.display()))?,
        (None, None) => bail!("audit decode needs a BLOB argument or --file"),
    };
    Ok(audit::decode_history(&bytes)?)
}

fn run_kv(cmd: &KvCommand, output: OutputFormat) -> Result<String> {
    match cmd {
        KvCommand::Buckets(args) => {
            let store = KvStore::open(args.store.db_path()?)?;
            Ok(format::format_names(&store.buckets()?, output))
        }
        KvCommand::Keys(args) => {
            let store = KvStore::open(args.store.db_path()?)?;
            Ok(format::format_keys(&store.keys(&args.bucket)?, output))
        }
        KvCommand::Dump(args) => run_kv_dump(args, output),
    }
}

fn run_kv_dump(args: &KvDumpArgs, output: OutputFormat) -> Result<String> {
    let store = KvStore::open(args.store.db_path()?)?;
    let key = if args.key_hex {
        audit::parse_hex(&args.key)?
    } else {
        args.key.clone().into_bytes()
    };

    let value = store.get(&args.bucket, &key)?;
    debug!(
        bucket = %args.bucket,
        key = %display_key(&key),
        bytes = value.len(),
        view = ?args.view,
        "Read record"
    );

    let rendered = match args.view {
        ValueView::Raw => format::format_scalar("hex", &hex::encode(&value), output),
        ValueView::Text => {
            format::format_scalar("text", &String::from_utf8_lossy(&value), output)
        }
        ValueView::Json => format::format_json_bytes(&value)
            .map_err(|e| DebugError::decode_failed("JSON record", e))?,
        ValueView::Audit => format::format_history(&audit::decode_history(&value)?, output),
    };
    Ok(rendered)
}

fn run_base58(cmd: &Base58Command, output: OutputFormat) -> Result<String> {
    match cmd {
        Base58Command::Encode(args) => {
            let encoded = base58::encode_check(&args.hex, args.version_byte)?;
            Ok(format::format_scalar("base58", &encoded, output))
        }
        Base58Command::Decode(args) => {
            let decoded = base58::decode_check_hex(&args.input, args.version_byte)?;
            Ok(format::format_scalar("hex", &decoded, output))
        }
    }
}

fn run_config(cmd: &ConfigCommand, invocation: &Invocation, output: OutputFormat) -> Result<String> {
    match cmd {
        ConfigCommand::Show(args) => {
            Ok(format::format_config_query(
                &invocation.resolver,
                &args.command,
                args.flag_name(),
                output,
            ))
        }
        ConfigCommand::Path => {
            let text = match &invocation.config_source {
                Some((path, tier)) => format!("{} ({})", path.display(), tier),
                None => "<none>".to_string(),
            };
            Ok(format::format_scalar("config", &text, output))
        }
    }
}
