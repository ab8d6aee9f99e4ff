//! Blocking wrappers for the Columnist tools.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::args::{ColumnistTool, MESSAGES_TABLE, insert_args, query_args, search_args};
use super::types::{InsertResult, QueryOptions, QueryResult, SearchOptions};
use crate::error::Result;
use crate::mcp::blocking::McpClient;

impl McpClient {
    pub fn table(&self, database: impl Into<String>, table: impl Into<String>) -> TableApi<'_> {
        TableApi {
            client: self,
            database: database.into(),
            table: table.into(),
        }
    }

    pub fn messages(&self, database: impl Into<String>) -> TableApi<'_> {
        self.table(database, MESSAGES_TABLE)
    }
}

/// Blocking counterpart of [`super::api::TableApi`].
#[derive(Debug)]
pub struct TableApi<'a> {
    client: &'a McpClient,
    database: String,
    table: String,
}

impl TableApi<'_> {
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        self.query_as(options)
    }

    pub fn query_as<R: DeserializeOwned>(&self, options: &QueryOptions) -> Result<QueryResult<R>> {
        let args = query_args(&self.database, &self.table, options)?;
        self.client.call_tool_as(ColumnistTool::Query.name(), args)
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<QueryResult> {
        self.search_as(query, options)
    }

    pub fn search_as<R: DeserializeOwned>(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<QueryResult<R>> {
        let args = search_args(&self.database, &self.table, query, options)?;
        self.client.call_tool_as(ColumnistTool::Search.name(), args)
    }

    pub fn insert<R: Serialize>(&self, records: &[R]) -> Result<InsertResult> {
        let args = insert_args(&self.database, &self.table, records)?;
        self.client.call_tool_as(ColumnistTool::Insert.name(), args)
    }
}
