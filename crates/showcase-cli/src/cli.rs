//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "showcase", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, global = true, env = "SHOWCASE_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server.
    Serve {
        /// Port to listen on (overrides server.port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch the catalog from the CMS and print it.
    Categories {
        /// Print as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Inspect the CMS schema migrations.
    Migrations(MigrationsCommand),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Migration subcommands.
#[derive(Parser, Debug)]
pub struct MigrationsCommand {
    /// Migration subcommand to execute.
    #[command(subcommand)]
    pub command: MigrationsAction,
}

/// Available migration subcommands.
#[derive(Subcommand, Debug)]
pub enum MigrationsAction {
    /// List every migration in order.
    List,

    /// Show the steps needed to move between two versions.
    Plan {
        /// Last applied version. Omit for an empty schema.
        #[arg(long)]
        from: Option<u64>,

        /// Target version. Omit for the latest.
        #[arg(long)]
        to: Option<u64>,
    },

    /// Print the schema as JSON.
    Schema {
        /// Version to stop at. Omit for the latest.
        #[arg(long)]
        at: Option<u64>,
    },
}

/// Config subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration with the token masked.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::try_parse_from(["showcase"]).unwrap();
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_serve_port() {
        let args = CliArgs::try_parse_from(["showcase", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(args.command, Some(Command::Serve { port: Some(8080) })));
    }

    #[test]
    fn test_cli_args_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["showcase", "categories", "--json", "-v", "--config", "x.toml"])
                .unwrap();
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
        assert!(matches!(args.command, Some(Command::Categories { json: true })));
    }

    #[test]
    fn test_cli_args_migrations_plan() {
        let args = CliArgs::try_parse_from([
            "showcase",
            "migrations",
            "plan",
            "--from",
            "1758882317",
        ])
        .unwrap();
        match args.command {
            Some(Command::Migrations(cmd)) => match cmd.command {
                MigrationsAction::Plan { from, to } => {
                    assert_eq!(from, Some(1758882317));
                    assert!(to.is_none());
                }
                other => unreachable!("unexpected {other:?}"),
            },
            other => unreachable!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cli_args_config_init_force() {
        let args = CliArgs::try_parse_from(["showcase", "config", "init", "--force"]).unwrap();
        match args.command {
            Some(Command::Config(cmd)) => {
                assert!(matches!(cmd.command, ConfigAction::Init { file: None, force: true }));
            }
            other => unreachable!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cli_args_rejects_unknown_command() {
        assert!(CliArgs::try_parse_from(["showcase", "deploy"]).is_err());
    }

    #[test]
    fn test_cli_args_verify() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
