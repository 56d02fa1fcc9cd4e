//! Command-line interface definition for GenBI
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, session management, the datasource
//! catalog, and transcript export.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GenBI - Conversational BI assistant CLI
///
/// Ask natural-language questions about your data and get text insights,
/// chart specs, or tables back, with persistent chat sessions.
#[derive(Parser, Debug, Clone)]
#[command(name = "genbi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the session file path (also: GENBI_SESSIONS_FILE)
    #[arg(long)]
    pub sessions_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for GenBI
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Datasource to reference (defaults to the configured one)
        #[arg(short, long)]
        datasource: Option<String>,

        /// Resume an existing session by id (or unique id prefix)
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Manage chat sessions
    Sessions {
        /// Session management subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Inspect the datasource catalog
    Datasources {
        /// Datasource subcommand
        #[command(subcommand)]
        command: DatasourceCommand,
    },

    /// Export a session transcript
    Export {
        /// Session id (or unique id prefix)
        id: String,

        /// Output format: markdown or text
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List all sessions, newest first
    List,

    /// Create a new empty session
    New,

    /// Rename a session
    Rename {
        /// Session id (or unique id prefix)
        id: String,

        /// New title
        title: String,
    },

    /// Delete a session
    Delete {
        /// Session id (or unique id prefix)
        id: String,
    },
}

/// Datasource subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DatasourceCommand {
    /// List all configured datasources
    List,

    /// Show one datasource with its attributes
    Show {
        /// Datasource id
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_chat_command() {
        let cli = Cli::try_parse_from(["genbi", "chat", "--datasource", "sales"]).unwrap();
        match cli.command {
            Commands::Chat { datasource, resume } => {
                assert_eq!(datasource.as_deref(), Some("sales"));
                assert!(resume.is_none());
            }
            other => panic!("Expected chat command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_sessions_list() {
        let cli = Cli::try_parse_from(["genbi", "sessions", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                command: SessionCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_parses_sessions_rename() {
        let cli =
            Cli::try_parse_from(["genbi", "sessions", "rename", "01ARZ3", "Q3 numbers"]).unwrap();
        match cli.command {
            Commands::Sessions {
                command: SessionCommand::Rename { id, title },
            } => {
                assert_eq!(id, "01ARZ3");
                assert_eq!(title, "Q3 numbers");
            }
            other => panic!("Expected rename command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_export_defaults() {
        let cli = Cli::try_parse_from(["genbi", "export", "01ARZ3"]).unwrap();
        match cli.command {
            Commands::Export { id, format, output } => {
                assert_eq!(id, "01ARZ3");
                assert_eq!(format, "markdown");
                assert!(output.is_none());
            }
            other => panic!("Expected export command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::try_parse_from(["genbi", "sessions", "list"]).unwrap();
        assert_eq!(cli.config, "config/config.yaml");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["genbi", "--verbose", "sessions", "list"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["genbi", "frobnicate"]).is_err());
    }
}
