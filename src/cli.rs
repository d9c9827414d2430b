//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the family router.

use clap::{Parser, Subcommand};

/// Family Router - session-to-route resolution
///
/// Reads auth state snapshots (JSON) and decides which screen a guardian or
/// participant should see: sign-in, family-setup, pending-approval or today.
#[derive(Parser, Debug)]
#[command(name = "family-router")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the route for a single snapshot
    Resolve {
        /// Snapshot file, or - for stdin
        #[arg(short, long)]
        input: Option<String>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the persona derived from a single snapshot
    Persona {
        /// Snapshot file, or - for stdin
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Apply a JSON Lines sequence of snapshots to a navigation host
    Replay {
        /// JSON Lines file, or - for stdin
        #[arg(short, long)]
        input: Option<String>,

        /// Path to configuration file
        #[arg(short, long, env = "FAMILY_ROUTER_CONFIG")]
        config: Option<String>,

        /// Print events as JSON (overrides host.output)
        #[arg(long)]
        json: bool,
    },

    /// Stream snapshots from stdin, printing navigation events until EOF
    Follow {
        /// Path to configuration file
        #[arg(short, long, env = "FAMILY_ROUTER_CONFIG")]
        config: Option<String>,
    },

    /// Print the decision for every snapshot combination
    Matrix {
        /// Only rows where both readiness gates are open
        #[arg(long)]
        ready_only: bool,

        /// Print rows as JSON Lines
        #[arg(long)]
        json: bool,
    },

    /// Display version and build information
    Version {
        /// Print build information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::parse_from(["family-router", "resolve"]);
        match cli.command {
            Commands::Resolve { input, json } => {
                assert!(input.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_resolve_with_input() {
        let cli = Cli::parse_from(["family-router", "resolve", "--input", "state.json", "--json"]);
        match cli.command {
            Commands::Resolve { input, json } => {
                assert_eq!(input, Some("state.json".to_string()));
                assert!(json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_persona_stdin() {
        let cli = Cli::parse_from(["family-router", "persona", "-i", "-"]);
        match cli.command {
            Commands::Persona { input } => assert_eq!(input.as_deref(), Some("-")),
            _ => panic!("Expected Persona command"),
        }
    }

    #[test]
    fn test_replay_with_config() {
        let cli = Cli::parse_from([
            "family-router",
            "replay",
            "--input",
            "events.jsonl",
            "--config",
            "/path/to/config.toml",
        ]);
        match cli.command {
            Commands::Replay { input, config, json } => {
                assert_eq!(input, Some("events.jsonl".to_string()));
                assert_eq!(config, Some("/path/to/config.toml".to_string()));
                assert!(!json);
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_matrix_ready_only() {
        let cli = Cli::parse_from(["family-router", "matrix", "--ready-only"]);
        match cli.command {
            Commands::Matrix { ready_only, json } => {
                assert!(ready_only);
                assert!(!json);
            }
            _ => panic!("Expected Matrix command"),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["family-router", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["family-router", "--quiet", "version"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_show() {
        let cli = Cli::parse_from(["family-router", "config", "show"]);
        match cli.command {
            Commands::Config { subcommand: ConfigSubcommand::Show { config } } => {
                assert!(config.is_none());
            }
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["family-router", "config", "init", "--force"]);
        match cli.command {
            Commands::Config { subcommand: ConfigSubcommand::Init { path, force } } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
