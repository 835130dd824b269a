use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "useradmin",
    version,
    about = "CLI for administering user accounts on a fleet tracking server"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Backend to use (traccar, mock). If not specified, uses config or defaults to traccar.
    #[arg(long, short = 'b', value_enum, global = true, env = "USERADMIN_BACKEND")]
    pub backend: Option<Backend>,

    /// Path to a TOML config file
    #[arg(long, env = "USERADMIN_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server URL (overrides config file)
    #[arg(long, env = "USERADMIN_URL", global = true)]
    pub url: Option<String>,

    /// API token (overrides config file)
    #[arg(long, env = "USERADMIN_TOKEN", global = true)]
    pub token: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Traccar server REST API
    #[default]
    #[value(name = "traccar", alias = "t")]
    Traccar,
    /// Fixture directory (USERADMIN_MOCK_DIR or `mock_dir`)
    #[value(name = "mock", alias = "m")]
    Mock,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List users as a table
    #[command(visible_alias = "ls")]
    List {
        /// Only show users matching this keyword
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Include temporary users
        #[arg(long, short = 't')]
        temporary: bool,
    },
    /// Remove several users at once
    #[command(visible_alias = "rm")]
    Remove {
        /// User IDs to remove
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete a single user
    Delete {
        /// User ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Log in as another user (managers only)
    Login {
        /// User ID
        id: i64,

        /// Open the resulting page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Show the connections page of a user
    Connections {
        /// User ID
        id: i64,

        /// Open the page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Show the edit page of a user
    Edit {
        /// User ID
        id: i64,

        /// Open the page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Show the page for adding a user
    Create {
        /// Open the page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Interactive list session
    Browse,
    /// Configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "useradmin", &mut std::io::stdout());
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (token masked)
    Show,
    /// Show the config file paths that are searched
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_remove_with_several_ids() {
        let cli = Cli::try_parse_from(["useradmin", "remove", "3", "4", "--yes"]).unwrap();
        match cli.command {
            Commands::Remove { ids, yes } => {
                assert_eq!(ids, vec![3, 4]);
                assert!(yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["useradmin", "-vv", "browse"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
