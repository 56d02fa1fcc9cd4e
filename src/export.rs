//! Transcript export
//!
//! Renders a full session transcript to markdown or plain text for the
//! "download transcript" path. Markdown renders table payloads as pipe
//! tables and chart specs as fenced JSON; plain text keeps everything
//! readable without markup.

use crate::error::{GenbiError, Result};
use crate::session::{Message, Role, Session};
use std::path::Path;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// GitHub-flavored markdown
    Markdown,
    /// Plain text
    Text,
}

impl ExportFormat {
    /// Parse a format name from the command line
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::Export` for anything other than
    /// `markdown`/`md` or `text`/`txt`.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            other => Err(GenbiError::Export(format!("Unknown format: {}", other)).into()),
        }
    }

    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

/// Render a session transcript in the requested format
pub fn render_transcript(session: &Session, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => to_markdown(session),
        ExportFormat::Text => to_text(session),
    }
}

/// Render a transcript and write it to a file
///
/// # Errors
///
/// Returns `GenbiError::Io` if the target cannot be written.
pub fn export_to_file(session: &Session, format: ExportFormat, path: &Path) -> Result<()> {
    let rendered = render_transcript(session, format);
    std::fs::write(path, rendered)?;
    Ok(())
}

fn to_markdown(session: &Session) -> String {
    let mut out = format!(
        "# {}\n\nCreated: {}\n",
        session.title,
        session.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    for message in &session.messages {
        out.push_str(&format!("\n## {}\n\n", speaker(message)));
        if let Some(content) = &message.content {
            out.push_str(content);
            out.push('\n');
        } else if let Some(spec) = &message.chart {
            out.push_str("```json\n");
            out.push_str(&serde_json::to_string_pretty(spec).unwrap_or_default());
            out.push_str("\n```\n");
        } else if let Some(table) = &message.table {
            out.push_str(&format!("| {} |\n", table.columns.join(" | ")));
            out.push_str(&format!(
                "|{}\n",
                " --- |".repeat(table.columns.len())
            ));
            for row in &table.rows {
                out.push_str(&format!("| {} |\n", row.join(" | ")));
            }
        }
    }
    out
}

fn to_text(session: &Session) -> String {
    let mut out = format!("{}\n{}\n", session.title, "=".repeat(session.title.len()));

    for message in &session.messages {
        out.push_str(&format!(
            "\n[{}] {}\n",
            message.created_at.format("%Y-%m-%d %H:%M"),
            speaker(message)
        ));
        if let Some(content) = &message.content {
            out.push_str(content);
            out.push('\n');
        } else if let Some(spec) = &message.chart {
            out.push_str(&crate::render::summarize_chart(spec));
            out.push('\n');
        } else if let Some(table) = &message.table {
            out.push_str(&crate::render::format_table(table));
        }
    }
    out
}

fn speaker(message: &Message) -> &'static str {
    match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}
