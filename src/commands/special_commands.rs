//! Special commands parser for interactive chat mode
//!
//! Parses the `/`-prefixed commands available during a chat session:
//! session management (new, select, rename, delete), datasource selection,
//! transcript export, status, and help. Anything else is treated as a
//! question for the assistant.
//!
//! Commands are case-insensitive in their command word; arguments keep
//! their original casing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Create a new chat session and make it active
    NewChat,

    /// List all sessions
    ListSessions,

    /// Switch the active session by id or unique prefix
    SelectSession(String),

    /// Rename the active session
    RenameSession(String),

    /// Delete a session (the active one when no id is given)
    DeleteSession(Option<String>),

    /// Show the current datasource, or switch to another one
    Datasource(Option<String>),

    /// Export the active transcript
    ///
    /// Defaults to markdown next to the current directory when format or
    /// path are omitted.
    Export {
        format: Option<String>,
        output: Option<PathBuf>,
    },

    /// Display session and datasource status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send to the assistant
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a valid command, and `CommandError::MissingArgument` when a required
/// argument is absent.
///
/// # Examples
///
/// ```
/// use genbi::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/new").unwrap();
/// assert_eq!(cmd, SpecialCommand::NewChat);
///
/// let cmd = parse_special_command("show me sales").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/frobnicate").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') {
        if lower == "exit" || lower == "quit" {
            return Ok(SpecialCommand::Exit);
        }
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or("");

    match command.as_str() {
        "/new" => Ok(SpecialCommand::NewChat),
        "/sessions" | "/list" => Ok(SpecialCommand::ListSessions),

        "/select" | "/switch" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/select".to_string(),
                    usage: "/select <session-id>".to_string(),
                })
            } else {
                Ok(SpecialCommand::SelectSession(rest.to_string()))
            }
        }

        "/rename" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/rename".to_string(),
                    usage: "/rename <new title>".to_string(),
                })
            } else {
                Ok(SpecialCommand::RenameSession(rest.to_string()))
            }
        }

        "/delete" => {
            let id = if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            Ok(SpecialCommand::DeleteSession(id))
        }

        "/datasource" | "/ds" => {
            let id = if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            Ok(SpecialCommand::Datasource(id))
        }

        "/export" => {
            let mut args = rest.split_whitespace();
            let format = args.next().map(|s| s.to_string());
            let output = args.next().map(PathBuf::from);
            Ok(SpecialCommand::Export { format, output })
        }

        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print help for the interactive session
pub fn print_help() {
    println!("Available commands:");
    println!("  /new                      Start a new chat session");
    println!("  /sessions                 List all sessions");
    println!("  /select <id>              Switch to a session (id prefix works)");
    println!("  /rename <title>           Rename the active session");
    println!("  /delete [id]              Delete a session (default: active)");
    println!("  /datasource [id]          Show or switch the datasource");
    println!("  /export [format] [path]   Export transcript (markdown|text)");
    println!("  /status                   Show session and datasource status");
    println!("  /help                     Show this help");
    println!("  exit | quit               Leave the chat");
    println!();
    println!("Anything else is sent to the assistant as a question.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new() {
        assert_eq!(
            parse_special_command("/new").unwrap(),
            SpecialCommand::NewChat
        );
    }

    #[test]
    fn test_parse_sessions_aliases() {
        assert_eq!(
            parse_special_command("/sessions").unwrap(),
            SpecialCommand::ListSessions
        );
        assert_eq!(
            parse_special_command("/list").unwrap(),
            SpecialCommand::ListSessions
        );
    }

    #[test]
    fn test_parse_select_with_id() {
        assert_eq!(
            parse_special_command("/select 01ARZ3").unwrap(),
            SpecialCommand::SelectSession("01ARZ3".to_string())
        );
    }

    #[test]
    fn test_parse_select_missing_argument() {
        assert!(matches!(
            parse_special_command("/select"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_rename_keeps_title_casing() {
        assert_eq!(
            parse_special_command("/rename Q3 Revenue Review").unwrap(),
            SpecialCommand::RenameSession("Q3 Revenue Review".to_string())
        );
    }

    #[test]
    fn test_parse_rename_missing_argument() {
        assert!(parse_special_command("/rename").is_err());
        assert!(parse_special_command("/rename   ").is_err());
    }

    #[test]
    fn test_parse_delete_defaults_to_active() {
        assert_eq!(
            parse_special_command("/delete").unwrap(),
            SpecialCommand::DeleteSession(None)
        );
        assert_eq!(
            parse_special_command("/delete 01ARZ3").unwrap(),
            SpecialCommand::DeleteSession(Some("01ARZ3".to_string()))
        );
    }

    #[test]
    fn test_parse_datasource_show_and_switch() {
        assert_eq!(
            parse_special_command("/datasource").unwrap(),
            SpecialCommand::Datasource(None)
        );
        assert_eq!(
            parse_special_command("/ds sales").unwrap(),
            SpecialCommand::Datasource(Some("sales".to_string()))
        );
    }

    #[test]
    fn test_parse_export_variants() {
        assert_eq!(
            parse_special_command("/export").unwrap(),
            SpecialCommand::Export {
                format: None,
                output: None
            }
        );
        assert_eq!(
            parse_special_command("/export text out.txt").unwrap(),
            SpecialCommand::Export {
                format: Some("text".to_string()),
                output: Some(PathBuf::from("out.txt"))
            }
        );
    }

    #[test]
    fn test_parse_exit_variants() {
        assert_eq!(parse_special_command("exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("quit").unwrap(), SpecialCommand::Exit);
        assert_eq!(
            parse_special_command("/quit").unwrap(),
            SpecialCommand::Exit
        );
        assert_eq!(parse_special_command("EXIT").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_parse_command_word_case_insensitive() {
        assert_eq!(
            parse_special_command("/NEW").unwrap(),
            SpecialCommand::NewChat
        );
    }

    #[test]
    fn test_regular_question_is_none() {
        assert_eq!(
            parse_special_command("show me sales by region").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(matches!(
            parse_special_command("/frobnicate"),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_status_and_help() {
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }
}
