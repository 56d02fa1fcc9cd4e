//! Base provider trait for GenBI
//!
//! Defines the outbound query interface: given a natural-language question
//! and a datasource id, a provider produces one assistant message. The
//! canned provider is one concrete implementation of this capability; a
//! real BI/RAG backend would be another, preserving the same three-shape
//! response contract (text, chart spec, or header+rows table) so downstream
//! rendering is unaffected.

use crate::error::Result;
use crate::session::Message;
use async_trait::async_trait;

/// Capability to answer a query against a datasource
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Produce exactly one assistant message for the query
    ///
    /// # Arguments
    ///
    /// * `text` - The user's natural-language question
    /// * `datasource_id` - The selected datasource descriptor id
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::Provider` on dispatch failure. The canned
    /// implementation cannot fail by construction.
    async fn send_query(&self, text: &str, datasource_id: &str) -> Result<Message>;

    /// Human-readable provider name
    fn name(&self) -> &str;
}
