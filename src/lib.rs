//! Columnist MCP client
//!
//! A small client for Columnist MCP servers: call database tools over HTTP,
//! unwrap their double-encoded JSON results, and list server resources.
//!
//! # Async (tokio)
//!
//! ```rust,no_run
//! use columnist_mcp_client::{McpClient, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = McpClient::new("http://localhost:3000/mcp", "your-auth-token")?;
//!
//!     let hits = client
//!         .messages("my-app")
//!         .search("hello world", &SearchOptions::new().limit(5))
//!         .await?;
//!     println!("Search found {} results", hits.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Blocking
//!
//! ```rust,no_run
//! use columnist_mcp_client::mcp::blocking::McpClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = McpClient::new("http://localhost:3000/mcp", "your-auth-token")?;
//!     for resource in client.list_resources()? {
//!         println!("- {}: {}", resource.name, resource.uri);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`mcp`]: transport, wire types and envelope decoding
//! - [`columnist`]: message records and the query/search/insert tools
//! - [`config`]: layered configuration for the CLI
//! - [`error`]: error type and status classification

#![allow(clippy::missing_fields_in_debug)]

pub mod columnist;
pub mod config;
pub mod error;
pub mod mcp;
pub mod timestamp;

pub use columnist::{
    ColumnistTool, InsertResult, Message, OrderBy, QueryOptions, QueryResult, SearchOptions,
    SortDirection,
};
pub use error::{ApiFailure, Error, Result};
pub use mcp::client::McpClient;
pub use mcp::types::Resource;
