//! Model Context Protocol (MCP) HTTP client.
//!
//! Two endpoints are spoken, both as `POST` with a bearer token:
//!
//! - `{base_url}/tools/call` with body `{"name": ..., "arguments": {...}}`;
//!   the payload comes back JSON-encoded inside `content[0].text`.
//! - `{base_url}/resources/list`, answered with `{"resources": [...]}`.
//!
//! [`client::McpClient`] drives these on tokio, [`blocking::McpClient`] on the
//! calling thread. Both share the wire types and decoding in [`types`].

pub mod blocking;
pub mod client;
pub mod types;

use reqwest::header::HeaderValue;
use url::Url;

use crate::error::{Error, Result};

pub(crate) const TOOLS_CALL_PATH: &str = "tools/call";
pub(crate) const RESOURCES_LIST_PATH: &str = "resources/list";

/// Parse and check a server base URL such as `http://localhost:3000/mcp`.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "base URL must be an http(s) URL, got '{raw}'"
        )));
    }
    Ok(url)
}

/// Append `path` to the base URL's path, keeping any prefix like `/mcp`.
pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(path.split('/'));
    }
    url
}

/// `Authorization: Bearer {token}`, marked sensitive so it stays out of debug output.
pub(crate) fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| Error::Config(format!("auth token is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
