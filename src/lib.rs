//! Trello MCP Server Library
//!
//! This crate provides an MCP (Model Context Protocol) server for interacting
//! with the Trello API. It can be used as a library or run as a standalone
//! binary.
//!
//! # Features
//!
//! - **Single execution path**: every operation funnels through one client
//!   that owns credential injection, response caching, rate-limit pacing,
//!   and 429 retry
//! - **Full resource catalog**: boards, lists, cards, labels, checklists,
//!   attachments, and reactions
//! - **Attachment handling**: inline base64 embedding and filesystem
//!   downloads with MIME/file-name inference
//!
//! # Example
//!
//! ```rust,no_run
//! use trellomcp::{TrelloClient, TrelloServer};
//!
//! # fn example() -> Result<(), trellomcp::Error> {
//! // Create client directly for low-level API access
//! let client = TrelloClient::from_env()?;
//!
//! // Or create the MCP server for tool-based access
//! let server = TrelloServer::from_env()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod types;

// Re-export main types at crate root
pub use client::TrelloClient;
pub use config::{Config, LogLevel};
pub use error::Error;
pub use server::TrelloServer;

// Re-export commonly used types
pub use types::{
    AttachmentContent, AttachmentDownload, AttachmentPayload, Board, Card, Checklist,
    ChecklistItem, Label, List, Member, Reaction,
};
