//! Columnist database tools over MCP.
//!
//! A Columnist MCP server exposes three tools against a named database:
//!
//! - `columnist_query`: `database`, `table`, `where`, `order_by`, `limit`, `offset`
//! - `columnist_search`: `database`, `table`, `query`, `filters`, `limit`
//! - `columnist_insert`: `database`, `table`, `records`
//!
//! [`api::TableApi`] and [`blocking::TableApi`] wrap these for the async and
//! blocking MCP clients respectively.

pub mod api;
pub mod args;
pub mod blocking;
pub mod types;

pub use args::{ColumnistTool, MESSAGES_TABLE};
pub use types::{
    InsertResult, Message, OrderBy, QueryOptions, QueryResult, SearchOptions, SortDirection,
};
