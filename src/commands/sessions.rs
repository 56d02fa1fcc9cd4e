//! Session management commands
//!
//! Non-interactive counterparts of the `/` commands: list, create, rename,
//! and delete sessions directly from the shell. Listing reads the store
//! as-is; mutations go through the controller so id-prefix resolution and
//! the never-empty-list invariant behave exactly like interactive mode.

use crate::cli::SessionCommand;
use crate::config::Config;
use crate::controller::ChatController;
use crate::error::Result;
use crate::providers::create_provider;
use crate::session::{JsonFileStore, Session, SessionStore};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle session commands
pub fn handle_sessions(command: SessionCommand, config: &Config) -> Result<()> {
    let store = JsonFileStore::new()?;

    match command {
        SessionCommand::List => {
            let sessions = store.load();
            if sessions.is_empty() {
                println!("{}", "No sessions found.".yellow());
                return Ok(());
            }
            print_session_table(&sessions, None);
            println!(
                "Use {} to continue a session.",
                "genbi chat --resume <ID>".cyan()
            );
            println!();
        }
        SessionCommand::New => {
            let had_sessions = !store.load().is_empty();
            let mut controller = make_controller(store, config)?;
            // On a fresh store the controller already synthesized a default
            // session; creating another would leave two.
            let id = if had_sessions {
                controller.new_chat()
            } else {
                controller.active_id().to_string()
            };
            println!(
                "{}",
                format!("Created session {}", super::short_id(&id)).green()
            );
        }
        SessionCommand::Rename { id, title } => {
            let mut controller = make_controller(store, config)?;
            if controller.rename_session(&id, &title) {
                println!("{}", format!("Renamed {} to '{}'", id, title.trim()).green());
            } else {
                println!(
                    "{}",
                    format!("No session matching '{}' (or blank title)", id).red()
                );
            }
        }
        SessionCommand::Delete { id } => {
            let mut controller = make_controller(store, config)?;
            if controller.delete_session(&id) {
                println!("{}", format!("Deleted session {}", id).green());
            } else {
                println!("{}", format!("No session matching '{}'", id).red());
            }
        }
    }

    Ok(())
}

fn make_controller(store: JsonFileStore, config: &Config) -> Result<ChatController<JsonFileStore>> {
    let provider = create_provider(&config.provider)?;
    Ok(ChatController::new(
        store,
        provider,
        config.chat.clone(),
        config.chat.default_datasource.clone(),
    ))
}

/// Print the session list as a bordered table, newest first
///
/// The active session (when given) is marked with an asterisk.
pub fn print_session_table(sessions: &[Session], active_id: Option<&str>) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "".bold(),
        "ID".bold(),
        "Title".bold(),
        "Messages".bold(),
        "Created".bold()
    ]);

    for session in sessions {
        let id_short = super::short_id(&session.id);
        let title = truncate_title(&session.title);
        let marker = if active_id == Some(session.id.as_str()) {
            "*"
        } else {
            ""
        };
        let created = session.created_at.format("%Y-%m-%d %H:%M").to_string();

        table.add_row(prettytable::row![
            marker,
            id_short.cyan(),
            title,
            session.message_count,
            created
        ]);
    }

    println!("\nSessions (newest first):");
    table.printstd();
    println!();
}

/// Shorten a title to fit the list column
///
/// Titles are arbitrary user input via rename, so counting and cutting
/// happen on character boundaries, never byte offsets.
fn truncate_title(title: &str) -> String {
    if title.chars().count() > 40 {
        let head: String = title.chars().take(37).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_passes_through() {
        assert_eq!(truncate_title("Quarterly review"), "Quarterly review");
    }

    #[test]
    fn test_truncate_title_long_ascii() {
        let long = "a".repeat(50);
        let shown = truncate_title(&long);
        assert_eq!(shown, format!("{}...", "a".repeat(37)));
    }

    #[test]
    fn test_truncate_title_multibyte_cuts_on_char_boundary() {
        // 50 bytes but 25 chars: short enough to pass through untouched.
        let accented = "é".repeat(25);
        assert_eq!(truncate_title(&accented), accented);

        // 41 chars of multibyte input must truncate without panicking.
        let long = "é".repeat(41);
        let shown = truncate_title(&long);
        assert_eq!(shown, format!("{}...", "é".repeat(37)));
    }

    #[test]
    fn test_print_session_table_handles_renamed_multibyte_title() {
        let mut session = Session::new("New chat", "Hello!");
        session.title = "é".repeat(25);
        print_session_table(&[session], None);
    }
}
