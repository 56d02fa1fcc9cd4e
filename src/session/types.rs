//! Chat session and message types
//!
//! Defines the data model for persisted chat sessions: messages with one of
//! three payload shapes (text, chart spec, table), and sessions holding an
//! ordered transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Message produced by the assistant
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Structured tabular payload for an assistant message
///
/// Column headers and rows are ordered; every row must have exactly one
/// cell per column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePayload {
    /// Ordered column headers
    pub columns: Vec<String>,
    /// Ordered rows; each row is an ordered list of string cells
    pub rows: Vec<Vec<String>>,
}

impl TablePayload {
    /// Create a table payload from headers and rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Check that every row has exactly one cell per column
    ///
    /// # Examples
    ///
    /// ```
    /// use genbi::session::TablePayload;
    ///
    /// let table = TablePayload::new(
    ///     vec!["Product".into(), "Revenue".into()],
    ///     vec![vec!["Widget A".into(), "1200".into()]],
    /// );
    /// assert!(table.is_rectangular());
    /// ```
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.columns.len())
    }
}

/// A single chat message
///
/// Exactly one of `content`, `chart`, or `table` is populated. User messages
/// always carry `content`; assistant messages carry whichever payload shape
/// the provider produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (ULID, monotonic by creation order)
    pub id: String,
    /// Sender role
    pub role: Role,
    /// Text body, if this is a text message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Creation timestamp, serialized as RFC-3339
    pub created_at: DateTime<Utc>,
    /// Declarative chart specification (opaque, passed through to rendering)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<serde_json::Value>,
    /// Tabular payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TablePayload>,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use genbi::session::{Message, Role};
    ///
    /// let msg = Message::user("show me sales");
    /// assert_eq!(msg.role, Role::User);
    /// assert_eq!(msg.content.as_deref(), Some("show me sales"));
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::User,
            content: Some(content.into()),
            created_at: Utc::now(),
            chart: None,
            table: None,
        }
    }

    /// Creates a text-only assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: Some(content.into()),
            created_at: Utc::now(),
            chart: None,
            table: None,
        }
    }

    /// Creates an assistant message carrying a chart specification
    pub fn assistant_chart(spec: serde_json::Value) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: None,
            created_at: Utc::now(),
            chart: Some(spec),
            table: None,
        }
    }

    /// Creates an assistant message carrying a table payload
    pub fn assistant_table(table: TablePayload) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: None,
            created_at: Utc::now(),
            chart: None,
            table: Some(table),
        }
    }

    /// True when exactly one of the three payload forms is populated
    pub fn has_single_payload(&self) -> bool {
        let populated = [
            self.content.is_some(),
            self.chart.is_some(),
            self.table.is_some(),
        ];
        populated.iter().filter(|p| **p).count() == 1
    }
}

/// A named, timestamped, ordered transcript of messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (ULID)
    pub id: String,
    /// User-editable display title
    pub title: String,
    /// Creation timestamp, serialized as RFC-3339
    pub created_at: DateTime<Utc>,
    /// Cached transcript length; always equals `messages.len()` after any
    /// mutation, never a source of truth
    pub message_count: usize,
    /// Ordered transcript, insertion order is chronological order
    pub messages: Vec<Message>,
}

impl Session {
    /// Create a new session seeded with one assistant greeting
    ///
    /// # Examples
    ///
    /// ```
    /// use genbi::session::Session;
    ///
    /// let session = Session::new("New chat", "Hello!");
    /// assert_eq!(session.message_count, 1);
    /// assert_eq!(session.messages.len(), 1);
    /// ```
    pub fn new(title: impl Into<String>, greeting: impl Into<String>) -> Self {
        let greeting = Message::assistant(greeting);
        Self {
            id: new_id(),
            title: title.into(),
            created_at: Utc::now(),
            message_count: 1,
            messages: vec![greeting],
        }
    }

    /// Append a message, keeping the cached count in sync
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.message_count = self.messages.len();
    }
}

/// Generate a new ULID for a session or message
///
/// ULIDs are preferred over UUIDs as they are sortable by timestamp, so
/// identifiers are monotonic by creation order.
pub fn new_id() -> String {
    Ulid::new().to_string()
}
