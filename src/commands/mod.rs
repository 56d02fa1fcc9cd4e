/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`        — Interactive chat mode
- `sessions`    — Session management (list, new, rename, delete)
- `datasources` — Datasource catalog inspection
- `export`      — Transcript export

These handlers are intentionally small and use the library components:
the session store, the controller, and the response provider.
*/

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::controller::{ChatController, SendState};
use crate::error::Result;
use crate::export::ExportFormat;
use crate::providers::create_provider;
use crate::render;
use crate::session::{JsonFileStore, Message, Role, Session, SessionStore};

// Special commands parser for the interactive loop
pub mod special_commands;

// Session management commands
pub mod sessions;

// Datasource catalog commands
pub mod datasources;

/// Resolve a session by exact id or unique id prefix from a plain list
///
/// Shared by the non-interactive handlers that work on the store directly
/// rather than through a controller.
pub(crate) fn find_session<'a>(sessions: &'a [Session], id: &str) -> Option<&'a Session> {
    if let Some(session) = sessions.iter().find(|s| s.id == id) {
        return Some(session);
    }
    let mut matches = sessions.iter().filter(|s| s.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(session), None) if !id.is_empty() => Some(session),
        _ => None,
    }
}

/// First eight characters of a session id for display
///
/// Self-minted ULIDs are always 26 ASCII characters, but ids read back from
/// a hand-edited session file may be shorter; show them whole in that case.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Instantiates the provider and the file-backed session store, creates
    //! a `ChatController`, and runs a readline-based loop that submits user
    //! input as queries and dispatches `/` commands locally.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `datasource` - Optional override for the configured datasource
    /// * `resume` - Optional session id (or unique prefix) to resume
    ///
    /// # Examples
    ///
    /// ```
    /// use genbi::commands::chat;
    /// use genbi::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default(), None, None).await?;
    /// ```
    pub async fn run_chat(
        config: Config,
        datasource: Option<String>,
        resume: Option<String>,
    ) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let datasource_id = datasource.unwrap_or_else(|| config.chat.default_datasource.clone());
        if config.find_datasource(&datasource_id).is_none() {
            println!(
                "{}",
                format!(
                    "Unknown datasource '{}'. Try 'genbi datasources list'.",
                    datasource_id
                )
                .red()
            );
            return Ok(());
        }

        let store = JsonFileStore::new()?;
        let provider = create_provider(&config.provider)?;
        let mut controller =
            ChatController::new(store, provider, config.chat.clone(), datasource_id);

        if let Some(id) = resume {
            if !controller.select_session(&id) {
                println!(
                    "{}",
                    format!("No session matching '{}', starting from the latest.", id).yellow()
                );
            }
        }

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&controller, &config);
        print_transcript(controller.active_transcript());

        loop {
            let prompt = format!("{} ", "genbi>".cyan().bold());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{}", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::NewChat => {
                            controller.new_chat();
                            println!("{}", "Started a new chat.".green());
                            print_transcript(controller.active_transcript());
                        }
                        SpecialCommand::ListSessions => {
                            sessions::print_session_table(
                                controller.sessions(),
                                Some(controller.active_id()),
                            );
                        }
                        SpecialCommand::SelectSession(id) => {
                            if controller.select_session(&id) {
                                println!(
                                    "{}",
                                    format!(
                                        "Switched to '{}'.",
                                        controller.active_session().title
                                    )
                                    .green()
                                );
                                print_transcript(controller.active_transcript());
                            } else {
                                println!("{}", format!("No session matching '{}'.", id).red());
                            }
                        }
                        SpecialCommand::RenameSession(title) => {
                            let id = controller.active_id().to_string();
                            if controller.rename_session(&id, &title) {
                                println!("{}", format!("Renamed to '{}'.", title.trim()).green());
                            } else {
                                println!("{}", "Title cannot be blank.".red());
                            }
                        }
                        SpecialCommand::DeleteSession(id) => {
                            let target =
                                id.unwrap_or_else(|| controller.active_id().to_string());
                            if controller.delete_session(&target) {
                                println!("{}", "Session deleted.".green());
                                print_transcript(controller.active_transcript());
                            } else {
                                println!(
                                    "{}",
                                    format!("No session matching '{}'.", target).red()
                                );
                            }
                        }
                        SpecialCommand::Datasource(None) => {
                            print_datasource_status(&controller, &config);
                        }
                        SpecialCommand::Datasource(Some(id)) => {
                            if let Some(ds) = config.find_datasource(&id) {
                                controller.select_datasource(&ds.id);
                                println!(
                                    "{}",
                                    format!("Now referencing {} ({}).", ds.name, ds.id).green()
                                );
                            } else {
                                println!(
                                    "{}",
                                    format!(
                                        "Unknown datasource '{}'. Try '/datasource' to list.",
                                        id
                                    )
                                    .red()
                                );
                            }
                        }
                        SpecialCommand::Export { format, output } => {
                            let result = export_active(&controller, format, output);
                            match result {
                                Ok(path) => {
                                    println!("{}", format!("Exported to {}", path).green())
                                }
                                Err(e) => println!("{}", format!("Export failed: {}", e).red()),
                            }
                        }
                        SpecialCommand::ShowStatus => {
                            print_status(&controller);
                        }
                        SpecialCommand::Help => print_help(),
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            println!("{}", "Thinking...".dimmed());
                            controller.send_message(trimmed).await?;
                            if let Some(reply) = controller.active_transcript().last() {
                                if reply.role == Role::Assistant {
                                    print_message(reply);
                                }
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }

        println!("{}", "Goodbye!".cyan());
        Ok(())
    }

    fn print_welcome_banner<S: SessionStore>(controller: &ChatController<S>, config: &Config) {
        let datasource_name = config
            .find_datasource(controller.datasource_id())
            .map(|ds| ds.name.as_str())
            .unwrap_or(controller.datasource_id());

        println!();
        println!("{}", "GenBI - BI Assistant".cyan().bold());
        println!(
            "Session: {}  |  Datasource: {}",
            controller.active_session().title.bold(),
            datasource_name.bold()
        );
        println!("{}", "Type '/help' for commands, 'exit' to quit.".dimmed());
        println!();
    }

    fn print_transcript(messages: &[Message]) {
        println!();
        for message in messages {
            print_message(message);
        }
    }

    fn print_message(message: &Message) {
        let speaker = match message.role {
            Role::User => "You".green().bold(),
            Role::Assistant => "Assistant".cyan().bold(),
        };
        println!("{}:", speaker);
        println!("{}", render::render_body(message));
        println!();
    }

    fn print_status<S: SessionStore>(controller: &ChatController<S>) {
        let session = controller.active_session();
        println!();
        println!("{}", "Status".bold());
        println!("  Session:    {} ({})", session.title, short_id(&session.id));
        println!("  Messages:   {}", session.message_count);
        println!("  Sessions:   {}", controller.sessions().len());
        println!("  Datasource: {}", controller.datasource_id());
        let state = match controller.state() {
            SendState::Idle => "idle",
            SendState::AwaitingResponse => "awaiting response",
        };
        println!("  State:      {}", state);
        println!();
    }

    fn print_datasource_status<S: SessionStore>(controller: &ChatController<S>, config: &Config) {
        println!();
        println!("Current datasource: {}", controller.datasource_id().bold());
        println!("Available:");
        for ds in &config.datasources {
            println!("  {} - {}", ds.id.cyan(), ds.name);
        }
        println!();
    }

    fn export_active<S: SessionStore>(
        controller: &ChatController<S>,
        format: Option<String>,
        output: Option<std::path::PathBuf>,
    ) -> Result<String> {
        let format = match format {
            Some(name) => ExportFormat::parse_str(&name)?,
            None => ExportFormat::Markdown,
        };
        let session = controller.active_session();
        let path = output.unwrap_or_else(|| {
            std::path::PathBuf::from(format!(
                "genbi-{}.{}",
                short_id(&session.id).to_lowercase(),
                format.extension()
            ))
        });
        crate::export::export_to_file(session, format, &path)?;
        Ok(path.display().to_string())
    }
}

// Export command handler
pub mod export {
    //! Non-interactive transcript export.
    //!
    //! Loads the session list from the store, resolves the requested id,
    //! and writes the rendered transcript to a file or stdout.

    use super::*;
    use crate::error::GenbiError;
    use std::path::PathBuf;

    /// Export a session transcript by id
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::SessionNotFound` when the id resolves to no
    /// session, and `GenbiError::Export` for an unknown format name.
    pub fn run_export(id: &str, format: &str, output: Option<PathBuf>) -> Result<()> {
        let format = ExportFormat::parse_str(format)?;
        let store = JsonFileStore::new()?;
        let sessions = store.load();

        let session = find_session(&sessions, id)
            .ok_or_else(|| GenbiError::SessionNotFound(id.to_string()))?;

        match output {
            Some(path) => {
                crate::export::export_to_file(session, format, &path)?;
                println!("Exported '{}' to {}", session.title, path.display());
            }
            None => {
                print!("{}", crate::export::render_transcript(session, format));
            }
        }
        Ok(())
    }
}
