//! Async MCP client.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use super::types::{
    CallToolRequest, Resource, api_error, decode_resource_list, decode_tool_response,
};
use super::{RESOURCES_LIST_PATH, TOOLS_CALL_PATH, bearer_header, endpoint, parse_base_url};
use crate::error::Result;

/// Async client for an MCP tool server.
///
/// # Example
///
/// ```rust,no_run
/// use columnist_mcp_client::McpClient;
/// use serde_json::{Map, json};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = McpClient::new("http://localhost:3000/mcp", "your-auth-token")?;
///
/// let mut args = Map::new();
/// args.insert("database".into(), json!("my-app"));
/// args.insert("table".into(), json!("messages"));
/// let rows = client.call_tool("columnist_query", args).await?;
///
/// for resource in client.list_resources().await? {
///     println!("{}: {}", resource.name, resource.uri);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct McpClient {
    base_url: Url,
    auth: HeaderValue,
    http: reqwest::Client,
}

impl std::fmt::Debug for McpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl McpClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The MCP mount point (e.g., "http://localhost:3000/mcp")
    /// * `token` - Bearer token sent with every request
    pub fn new(base_url: impl AsRef<str>, token: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        token: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            auth: bearer_header(token.as_ref())?,
            http,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call a tool and return the unwrapped JSON payload.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<Value> {
        self.call_tool_as(name, arguments).await
    }

    /// Call a tool and deserialize the unwrapped payload into `T`.
    pub async fn call_tool_as<T: DeserializeOwned>(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<T> {
        let request = CallToolRequest::new(name, arguments);
        debug!(name: "mcp.tool.call", tool = %name, "Calling MCP tool");

        let response = self
            .http
            .post(endpoint(&self.base_url, TOOLS_CALL_PATH))
            .header(AUTHORIZATION, self.auth.clone())
            .json(&request)
            .send()
            .await?;
        let body = Self::handle_response(response, name).await?;
        decode_tool_response(&body)
    }

    /// List the resources the server advertises, as sent.
    pub async fn list_resources(&self) -> Result<Vec<Resource>> {
        debug!(name: "mcp.resources.list", "Listing MCP resources");

        let response = self
            .http
            .post(endpoint(&self.base_url, RESOURCES_LIST_PATH))
            .header(AUTHORIZATION, self.auth.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let body = Self::handle_response(response, RESOURCES_LIST_PATH).await?;
        decode_resource_list(&body)
    }

    async fn handle_response(response: reqwest::Response, operation: &str) -> Result<Vec<u8>> {
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(
                name: "mcp.request.failed",
                operation = %operation,
                status = status.as_u16(),
                "MCP request failed"
            );
            Err(api_error(status.as_u16(), &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_valid_url() {
        let client = McpClient::new("http://localhost:3000/mcp", "t").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/mcp");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = McpClient::new("http://localhost:3000/mcp", "super-secret").unwrap();
        let printed = format!("{client:?}");
        assert!(printed.contains("localhost:3000"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(McpClient::new("localhost:3000", "t").is_err());
    }
}
