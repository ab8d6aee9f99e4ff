//! Async wrappers for the Columnist tools.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::args::{ColumnistTool, MESSAGES_TABLE, insert_args, query_args, search_args};
use super::types::{InsertResult, QueryOptions, QueryResult, SearchOptions};
use crate::error::Result;
use crate::mcp::client::McpClient;

impl McpClient {
    /// Access a table of a Columnist database.
    pub fn table(&self, database: impl Into<String>, table: impl Into<String>) -> TableApi<'_> {
        TableApi {
            client: self,
            database: database.into(),
            table: table.into(),
        }
    }

    /// Access the `messages` table of a Columnist database.
    pub fn messages(&self, database: impl Into<String>) -> TableApi<'_> {
        self.table(database, MESSAGES_TABLE)
    }
}

/// Table API client.
///
/// # Example
///
/// ```rust,no_run
/// use columnist_mcp_client::{McpClient, Message, OrderBy, QueryOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = McpClient::new("http://localhost:3000/mcp", "your-auth-token")?;
/// let messages = client.messages("my-app");
///
/// let page = messages
///     .query(&QueryOptions::new()
///         .where_eq("user_id", "user-123")
///         .order_by(OrderBy::desc("timestamp"))
///         .limit(10))
///     .await?;
///
/// let inserted = messages
///     .insert(&[Message::new("msg-1", "Hello from Rust!", "user-123")])
///     .await?;
/// println!("{} rows, inserted {:?}", page.len(), inserted.inserted_ids);
/// # Ok(())
/// # }
/// ```
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

    /// Query message rows (`columnist_query`).
    pub async fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        self.query_as(options).await
    }

    /// Query rows of any shape, e.g. `query_as::<serde_json::Value>`.
    pub async fn query_as<R: DeserializeOwned>(
        &self,
        options: &QueryOptions,
    ) -> Result<QueryResult<R>> {
        let args = query_args(&self.database, &self.table, options)?;
        self.client
            .call_tool_as(ColumnistTool::Query.name(), args)
            .await
    }

    /// Full-text search over message rows (`columnist_search`).
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<QueryResult> {
        self.search_as(query, options).await
    }

    pub async fn search_as<R: DeserializeOwned>(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<QueryResult<R>> {
        let args = search_args(&self.database, &self.table, query, options)?;
        self.client
            .call_tool_as(ColumnistTool::Search.name(), args)
            .await
    }

    /// Insert records (`columnist_insert`).
    pub async fn insert<R: Serialize>(&self, records: &[R]) -> Result<InsertResult> {
        let args = insert_args(&self.database, &self.table, records)?;
        self.client
            .call_tool_as(ColumnistTool::Insert.name(), args)
            .await
    }
}
