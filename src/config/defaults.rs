//! Installs configured values as clap argument defaults.
//!
//! Defaults are the lowest-priority clap source, so values typed on the
//! command line or taken from an `env` variable still win.

use super::resolver::ConfigResolver;
use clap::{Arg, ArgAction, Command};
use serde_json::Value;
use tracing::debug;

/// Argument id of the flag that names the configuration file itself.
const CONFIG_ARG_ID: &str = "config";

/// A default taken from the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDefault {
    /// Enclosing subcommands, root first.
    pub command_path: Vec<String>,
    /// Long flag name used for the lookup.
    pub flag: String,
    /// Text handed to clap.
    pub values: Vec<String>,
}

/// Walk `command` and its subcommands, installing configured defaults.
///
/// Returns the rewritten command and the defaults that were applied.
pub fn apply_config_defaults(
    command: Command,
    resolver: &ConfigResolver,
) -> (Command, Vec<AppliedDefault>) {
    let mut applied = Vec::new();
    if resolver.is_empty() {
        return (command, applied);
    }

    let command = apply_at(command, &mut Vec::new(), resolver, &mut applied);
    (command, applied)
}

struct Target {
    id: String,
    flag: String,
    multiple: bool,
}

fn apply_at(
    mut command: Command,
    path: &mut Vec<String>,
    resolver: &ConfigResolver,
    applied: &mut Vec<AppliedDefault>,
) -> Command {
    let targets: Vec<Target> = command
        .get_arguments()
        .filter(|arg| accepts_config(arg))
        .map(|arg| Target {
            id: arg.get_id().to_string(),
            flag: arg.get_long().unwrap_or(arg.get_id().as_str()).to_string(),
            multiple: matches!(arg.get_action(), ArgAction::Append),
        })
        .collect();

    for target in targets {
        let resolution = resolver.resolve(path.as_slice(), &target.flag);
        let Some(value) = resolution.value() else {
            continue;
        };

        let Some(values) = default_text(value, target.multiple) else {
            debug!(
                flag = %target.flag,
                command = %path.join(" "),
                "Ignoring configured value that is not a usable flag default"
            );
            continue;
        };

        command = command.mut_arg(&target.id, |arg| arg.default_values(values.clone()));
        applied.push(AppliedDefault {
            command_path: path.clone(),
            flag: target.flag,
            values,
        });
    }

    let subcommands: Vec<String> = command
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect();
    for name in subcommands {
        path.push(name.clone());
        command = command.mut_subcommand(&name, |sub| apply_at(sub, path, resolver, applied));
        path.pop();
    }

    command
}

/// Named, optional flags other than help/version and `--config`.
///
/// clap rejects defaults on required arguments.
fn accepts_config(arg: &Arg) -> bool {
    !arg.is_positional()
        && !arg.is_required_set()
        && arg.get_id().as_str() != CONFIG_ARG_ID
        && !matches!(
            arg.get_action(),
            ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
        )
}

/// Flag text for a configured value.
///
/// Sequences are only accepted by flags that take several values.
fn default_text(value: &Value, multiple: bool) -> Option<Vec<String>> {
    match value {
        Value::Array(items) if multiple => items.iter().map(scalar_text).collect(),
        Value::Array(_) | Value::Object(_) | Value::Null => None,
        scalar => scalar_text(scalar).map(|text| vec![text]),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
