//! Blocking MCP client.
//!
//! Same calls as [`super::client::McpClient`], each one blocking the current
//! thread until the response is read. Must not be used from inside a tokio
//! runtime (a `reqwest::blocking` restriction).

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

/// Blocking client for an MCP tool server.
#[derive(Clone)]
pub struct McpClient {
    base_url: Url,
    auth: HeaderValue,
    http: reqwest::blocking::Client,
}

impl std::fmt::Debug for McpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::McpClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl McpClient {
    pub fn new(base_url: impl AsRef<str>, token: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, token, reqwest::blocking::Client::new())
    }

    pub fn with_client(
        base_url: impl AsRef<str>,
        token: impl AsRef<str>,
        http: reqwest::blocking::Client,
    ) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            auth: bearer_header(token.as_ref())?,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<Value> {
        self.call_tool_as(name, arguments)
    }

    pub fn call_tool_as<T: DeserializeOwned>(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<T> {
        let request = CallToolRequest::new(name, arguments);
        debug!(name: "mcp.tool.call", tool = %name, blocking = true, "Calling MCP tool");

        let response = self
            .http
            .post(endpoint(&self.base_url, TOOLS_CALL_PATH))
            .header(AUTHORIZATION, self.auth.clone())
            .json(&request)
            .send()?;
        let body = Self::handle_response(response, name)?;
        decode_tool_response(&body)
    }

    pub fn list_resources(&self) -> Result<Vec<Resource>> {
        debug!(name: "mcp.resources.list", blocking = true, "Listing MCP resources");

        let response = self
            .http
            .post(endpoint(&self.base_url, RESOURCES_LIST_PATH))
            .header(AUTHORIZATION, self.auth.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        let body = Self::handle_response(response, RESOURCES_LIST_PATH)?;
        decode_resource_list(&body)
    }

    fn handle_response(response: reqwest::blocking::Response, operation: &str) -> Result<Vec<u8>> {
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes()?.to_vec())
        } else {
            let body = response.text().unwrap_or_default();
            warn!(
                name: "mcp.request.failed",
                operation = %operation,
                status = status.as_u16(),
                blocking = true,
                "MCP request failed"
            );
            Err(api_error(status.as_u16(), &body))
        }
    }
}
