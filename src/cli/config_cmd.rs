//! Config subcommands.

use clap::{Args, Subcommand};

/// Inspect configuration lookups
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show how a flag resolves: `config show kv dump db`
    Show(ConfigShowArgs),
    /// Print the config file in use
    Path,
}

/// Arguments for `config show`
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Subcommand path the flag belongs to, root first
    #[arg(value_name = "COMMAND")]
    pub command: Vec<String>,

    /// Flag name
    #[arg(value_name = "FLAG", required = true)]
    pub flag: String,
}

impl ConfigShowArgs {
    /// The flag name without a leading `--`.
    pub fn flag_name(&self) -> &str {
        self.flag.trim_start_matches("--")
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use super::*;
    use clap::Parser;

    fn show_args(args: &[&str]) -> ConfigShowArgs {
        let cli = Cli::try_parse_from(args).expect("Failed to parse");
        match cli.command {
            Command::Config(ConfigCommand::Show(args)) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_splits_command_path_and_flag() {
        let args = show_args(&["ops-debug", "config", "show", "kv", "dump", "db"]);
        assert_eq!(args.command, vec!["kv", "dump"]);
        assert_eq!(args.flag_name(), "db");
    }

    #[test]
    fn test_show_bare_flag_has_empty_path() {
        let args = show_args(&["ops-debug", "config", "show", "format"]);
        assert!(args.command.is_empty());
        assert_eq!(args.flag_name(), "format");
    }

    #[test]
    fn test_show_requires_flag() {
        assert!(Cli::try_parse_from(["ops-debug", "config", "show"]).is_err());
    }
}
