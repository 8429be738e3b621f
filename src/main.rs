//! ops-debug
//!
//! Operator debug utilities whose flags take defaults from a YAML config
//! file.

use anyhow::Result;
use ops_debug::cli;
use ops_debug::commands;
use ops_debug::error::DebugError;
use ops_debug::format::OutputFormat;
use ops_debug::logging;
use std::io::Write;
use tracing::debug;

fn main() -> Result<()> {
    let invocation = match cli::parse() {
        Ok(invocation) => invocation,
        Err(err) => match err.downcast::<clap::Error>() {
            // Help, version and usage errors print and exit the clap way.
            Ok(clap_err) => clap_err.exit(),
            Err(err) => return Err(err),
        },
    };

    logging::init(&invocation.cli.log, invocation.cli.verbose)?;

    if let Some((path, tier)) = &invocation.config_source {
        debug!(path = %path.display(), %tier, "Loaded configuration");
    }
    for applied in &invocation.applied {
        debug!(
            command = %applied.command_path.join(" "),
            flag = %applied.flag,
            values = ?applied.values,
            "Flag default from configuration"
        );
    }

    match commands::execute(&invocation) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Err(err) if invocation.cli.format == OutputFormat::Json => {
            let debug_err = DebugError::from(err);
            let json = serde_json::to_string_pretty(&debug_err)
                .unwrap_or_else(|_| serde_json::json!({ "error": debug_err.to_string() }).to_string());
            eprintln!("{}", json);
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}
