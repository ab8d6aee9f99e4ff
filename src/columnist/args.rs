//! Tool names and argument building for the Columnist tools.
//!
//! Every call starts from the fixed fields (`database`, `table`, and `query`
//! for search); caller options are merged on top, so a key in
//! [`QueryOptions::extra`] or [`SearchOptions::extra`] replaces a fixed field
//! of the same name.

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::{QueryOptions, SearchOptions};
use crate::error::{Error, Result};

/// Default table for message records.
pub const MESSAGES_TABLE: &str = "messages";

/// The remote tools exposed by a Columnist MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnistTool {
    Query,
    Search,
    Insert,
}

impl ColumnistTool {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "columnist_query",
            Self::Search => "columnist_search",
            Self::Insert => "columnist_insert",
        }
    }
}

impl std::fmt::Display for ColumnistTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments for `columnist_query`.
pub fn query_args(database: &str, table: &str, options: &QueryOptions) -> Result<Map<String, Value>> {
    merge(base_args(database, table), options)
}

/// Arguments for `columnist_search`.
pub fn search_args(
    database: &str,
    table: &str,
    query: &str,
    options: &SearchOptions,
) -> Result<Map<String, Value>> {
    let mut args = base_args(database, table);
    args.insert("query".to_string(), Value::String(query.to_string()));
    merge(args, options)
}

/// Arguments for `columnist_insert`.
pub fn insert_args<R: Serialize>(
    database: &str,
    table: &str,
    records: &[R],
) -> Result<Map<String, Value>> {
    let mut args = base_args(database, table);
    args.insert("records".to_string(), serde_json::to_value(records)?);
    Ok(args)
}

fn base_args(database: &str, table: &str) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("database".to_string(), Value::String(database.to_string()));
    args.insert("table".to_string(), Value::String(table.to_string()));
    args
}

fn merge<T: Serialize>(mut args: Map<String, Value>, options: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(options)? {
        Value::Object(extra) => {
            args.extend(extra);
            Ok(args)
        }
        other => Err(Error::Json(<serde_json::Error as serde::ser::Error>::custom(
            format!("tool options must serialize to an object, got {other}"),
        ))),
    }
}
