//! Transcript controller
//!
//! Owns the session list and the currently active session, mediates between
//! UI events (send, select, rename, delete, new chat) and the session
//! store, and issues the outbound query that produces the next assistant
//! message.
//!
//! Events are processed strictly one at a time: every operation takes
//! `&mut self`, so there is no parallelism within the controller. The only
//! asynchronous operation is the provider round trip awaited inside
//! `send_message`; while it is outstanding the controller reports
//! `SendState::AwaitingResponse` and further sends are no-ops.

use crate::config::ChatConfig;
use crate::error::Result;
use crate::providers::ResponseProvider;
use crate::session::{Message, Session, SessionStore};

/// Send state machine over the active transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    /// No outbound request in flight
    Idle,
    /// A query is in flight; input is disabled
    AwaitingResponse,
}

/// Active-session bookkeeping and message exchange
///
/// Invariants maintained across all operations:
/// - the session list is never empty (a default session is synthesized when
///   the last one is deleted or none were persisted);
/// - the active id always names a session in the list;
/// - new sessions are prepended, so list order is newest-first;
/// - every mutation of the list or the active transcript is followed by a
///   store save.
pub struct ChatController<S: SessionStore> {
    store: S,
    provider: Box<dyn ResponseProvider>,
    chat: ChatConfig,
    datasource_id: String,
    sessions: Vec<Session>,
    active_id: String,
    state: SendState,
}

impl<S: SessionStore> ChatController<S> {
    /// Create a controller, rehydrating sessions from the store
    ///
    /// When no persisted sessions exist, a fresh default session is
    /// synthesized and persisted. The first session becomes active.
    pub fn new(
        store: S,
        provider: Box<dyn ResponseProvider>,
        chat: ChatConfig,
        datasource_id: impl Into<String>,
    ) -> Self {
        let mut sessions = store.load();
        let mut dirty = false;
        if sessions.is_empty() {
            sessions.push(Session::new(&chat.default_title, &chat.greeting));
            dirty = true;
        }
        let active_id = sessions[0].id.clone();

        let controller = Self {
            store,
            provider,
            chat,
            datasource_id: datasource_id.into(),
            sessions,
            active_id,
            state: SendState::Idle,
        };
        if dirty {
            controller.persist();
        }
        controller
    }

    /// All sessions, newest first
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Id of the active session
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// The active session
    pub fn active_session(&self) -> &Session {
        // The active id always names a list member; fall back to the first
        // session rather than panic if the invariant is ever violated.
        self.sessions
            .iter()
            .find(|s| s.id == self.active_id)
            .unwrap_or(&self.sessions[0])
    }

    /// The active session's transcript
    pub fn active_transcript(&self) -> &[Message] {
        &self.active_session().messages
    }

    /// Current send state
    pub fn state(&self) -> SendState {
        self.state
    }

    /// Id of the datasource referenced by outbound queries
    pub fn datasource_id(&self) -> &str {
        &self.datasource_id
    }

    /// Switch the referenced datasource
    ///
    /// Display-only: the canned provider ignores it, but the id is carried
    /// on every outbound query so a real backend can use it.
    pub fn select_datasource(&mut self, id: impl Into<String>) {
        self.datasource_id = id.into();
    }

    /// Create a session, prepend it, make it active, persist
    ///
    /// Returns the new session's id.
    pub fn new_chat(&mut self) -> String {
        let session = Session::new(&self.chat.default_title, &self.chat.greeting);
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.active_id = id.clone();
        self.persist();
        id
    }

    /// Switch the active session
    ///
    /// Read-only: no persistence side effect. Returns false (and leaves the
    /// active id and displayed transcript unchanged) when `id` resolves to
    /// no session.
    pub fn select_session(&mut self, id: &str) -> bool {
        match self.resolve_id(id) {
            Some(resolved) => {
                self.active_id = resolved;
                true
            }
            None => false,
        }
    }

    /// Rename a session and persist
    ///
    /// A blank (empty or whitespace-only) title is a no-op. Returns whether
    /// a rename happened.
    pub fn rename_session(&mut self, id: &str, new_title: &str) -> bool {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(resolved) = self.resolve_id(id) else {
            return false;
        };
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == resolved) {
            session.title = trimmed.to_string();
            self.persist();
            return true;
        }
        false
    }

    /// Remove a session and persist
    ///
    /// Deleting the active session promotes the new first element to
    /// active, or synthesizes a fresh default session when none remain.
    /// Returns whether a session was removed.
    pub fn delete_session(&mut self, id: &str) -> bool {
        let Some(resolved) = self.resolve_id(id) else {
            return false;
        };
        self.sessions.retain(|s| s.id != resolved);

        if self.sessions.is_empty() {
            let session = Session::new(&self.chat.default_title, &self.chat.greeting);
            self.active_id = session.id.clone();
            self.sessions.push(session);
        } else if self.active_id == resolved {
            self.active_id = self.sessions[0].id.clone();
        }
        self.persist();
        true
    }

    /// Send a user message and await the assistant response
    ///
    /// No-op (returns false) when the trimmed text is empty or a response
    /// is already awaited. Otherwise the user message is appended to the
    /// active transcript synchronously, the provider is queried, and the
    /// resulting assistant message is appended when it resolves.
    ///
    /// The pending response is bound to the originating session: if that
    /// session was deleted while the query was in flight, the response is
    /// discarded. A provider failure is surfaced as an assistant message in
    /// the transcript rather than an error to the caller.
    pub async fn send_message(&mut self, text: &str) -> Result<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.state == SendState::AwaitingResponse {
            return Ok(false);
        }

        let origin_id = self.active_id.clone();
        self.push_to(&origin_id, Message::user(trimmed));
        self.persist();

        self.state = SendState::AwaitingResponse;
        let result = self
            .provider
            .send_query(trimmed, &self.datasource_id)
            .await;
        self.state = SendState::Idle;

        let reply = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Query failed: {}", e);
                Message::assistant(format!("Sorry, I couldn't answer that: {}", e))
            }
        };

        // With every operation taking &mut self, the list cannot change
        // while the await above is outstanding, so this guard never fires
        // today. It binds the response to its originating session for any
        // driver that interleaves deletes with pending sends.
        if self.sessions.iter().any(|s| s.id == origin_id) {
            self.push_to(&origin_id, reply);
            self.persist();
        } else {
            tracing::warn!(
                session = origin_id,
                "Originating session deleted, discarding response"
            );
        }
        Ok(true)
    }

    /// Resolve an exact session id or a unique id prefix
    fn resolve_id(&self, id: &str) -> Option<String> {
        if self.sessions.iter().any(|s| s.id == id) {
            return Some(id.to_string());
        }
        let mut matches = self.sessions.iter().filter(|s| s.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(session), None) if !id.is_empty() => Some(session.id.clone()),
            _ => None,
        }
    }

    fn push_to(&mut self, id: &str, message: Message) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.push_message(message);
        }
    }

    fn persist(&self) {
        self.store.save(&self.sessions);
    }
}
