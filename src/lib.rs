//! GenBI - Conversational BI assistant CLI library
//!
//! This library provides the core functionality for the GenBI assistant,
//! including the session store, transcript controller, response providers,
//! the datasource catalog, and transcript export.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `controller`: Transcript state machine mediating UI events and the store
//! - `session`: Session and message types plus persistence
//! - `providers`: Response provider abstraction and the canned implementation
//! - `config`: Configuration management and the datasource catalog
//! - `render`: Terminal rendering of text, chart, and table payloads
//! - `export`: Markdown and plain-text transcript export
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use genbi::config::Config;
//! use genbi::controller::ChatController;
//! use genbi::providers::create_provider;
//! use genbi::session::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let provider = create_provider(&config.provider)?;
//!     let mut controller = ChatController::new(
//!         MemoryStore::new(),
//!         provider,
//!         config.chat.clone(),
//!         config.chat.default_datasource.clone(),
//!     );
//!
//!     controller.send_message("show me sales by region").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod providers;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use controller::{ChatController, SendState};
pub use error::{GenbiError, Result};
pub use providers::{create_provider, CannedInsightProvider, ResponseProvider};
pub use session::{JsonFileStore, MemoryStore, Message, Role, Session, SessionStore};
