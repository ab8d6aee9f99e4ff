//! Wire types for the MCP HTTP endpoints.
//!
//! Tool results come back double-encoded: the HTTP body is a JSON envelope
//! whose first content block carries the actual payload as a JSON *string*.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};

/// Body of `POST {base_url}/tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolRequest {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl CallToolRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Response envelope of `POST {base_url}/tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<Value>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(
        rename = "structuredContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub structured_content: Option<Value>,
}

impl CallToolResult {
    /// Wrap a payload the way the server does: serialize it, then embed the
    /// string as the first text block.
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self> {
        let text = serde_json::to_string(payload)?;
        Ok(Self {
            content: vec![json!({ "type": "text", "text": text })],
            is_error: false,
            structured_content: None,
        })
    }

    /// `content[0].text`.
    pub fn text(&self) -> Result<&str> {
        let first = self
            .content
            .first()
            .ok_or_else(|| Error::MalformedEnvelope("empty content".to_string()))?;
        first
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedEnvelope("content[0] has no text".to_string()))
    }

    /// Unwrap the inner JSON payload.
    pub fn into_payload<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_error {
            let message = self
                .text()
                .map_or_else(|_| "tool reported an error".to_string(), str::to_string);
            return Err(Error::Tool(message));
        }
        Ok(serde_json::from_str(self.text()?)?)
    }
}

/// Response of `POST {base_url}/resources/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResult {
    pub resources: Vec<Resource>,
}

/// A resource descriptor as advertised by the server.
///
/// Keys other than `name` and `uri` are kept verbatim in `extra`, so a
/// descriptor serializes back to exactly what the server sent. `name` and
/// `uri` are required: a descriptor missing either rejects the whole list
/// with [`Error::Json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub uri: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(Value::as_str)
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.extra.get("mimeType").and_then(Value::as_str)
    }
}

/// Error body the Columnist server sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Decode a successful `tools/call` body into the inner payload.
pub fn decode_tool_response<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: CallToolResult = serde_json::from_slice(body)?;
    envelope.into_payload()
}

/// Decode a successful `resources/list` body.
pub fn decode_resource_list(body: &[u8]) -> Result<Vec<Resource>> {
    let list: ListResourcesResult = serde_json::from_slice(body)?;
    Ok(list.resources)
}

/// Build the error for a non-2xx response.
pub fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            status,
            message: parsed.error,
            code: parsed.code,
        },
        Err(_) => Error::Api {
            status,
            message: if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            },
            code: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let mut args = Map::new();
        args.insert("database".to_string(), json!("my-app"));
        let body = serde_json::to_value(CallToolRequest::new("columnist_query", args)).unwrap();
        assert_eq!(
            body,
            json!({ "name": "columnist_query", "arguments": { "database": "my-app" } })
        );
    }

    #[test]
    fn test_double_unwrap_round_trip() {
        let payload = json!({
            "data": [{ "id": "m1", "content": "hi", "nested": { "a": [1, 2, 3] } }],
            "total": 1
        });
        let envelope = CallToolResult::from_payload(&payload).unwrap();
        let body = serde_json::to_vec(&envelope).unwrap();
        let decoded: Value = decode_tool_response(&body).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_inner_text_is_a_json_string() {
        let envelope = CallToolResult::from_payload(&json!([1, 2])).unwrap();
        assert_eq!(envelope.text().unwrap(), "[1,2]");
    }

    #[test]
    fn test_empty_content_is_malformed() {
        let err = decode_tool_response::<Value>(br#"{"content": []}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope(_)));
    }

    #[test]
    fn test_missing_text_is_malformed() {
        let err = decode_tool_response::<Value>(br#"{"content": [{"type": "image"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedEnvelope(_)));
    }

    #[test]
    fn test_inner_text_not_json() {
        let err = decode_tool_response::<Value>(br#"{"content": [{"text": "oops"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_is_error_surfaces_text() {
        let body = br#"{"content": [{"type": "text", "text": "Database x not found"}], "isError": true}"#;
        match decode_tool_response::<Value>(body).unwrap_err() {
            Error::Tool(msg) => assert_eq!(msg, "Database x not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resources_preserved_verbatim() {
        let raw = json!({
            "resources": [
                {
                    "name": "Database Schema",
                    "uri": "mcp://columnist/my-app/schema/",
                    "description": "Complete database schema definition",
                    "mimeType": "application/json"
                },
                { "name": "messages Table", "uri": "mcp://columnist/my-app/messages/" }
            ]
        });
        let resources = decode_resource_list(&serde_json::to_vec(&raw).unwrap()).unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].mime_type(), Some("application/json"));
        assert_eq!(resources[1].description(), None);
        assert_eq!(serde_json::to_value(&resources).unwrap(), raw["resources"]);
    }

    #[test]
    fn test_descriptor_without_uri_rejects_list() {
        let body = br#"{"resources": [
            {"name": "Database Schema", "uri": "mcp://columnist/my-app/schema/"},
            {"name": "messages Table"}
        ]}"#;
        match decode_resource_list(body).unwrap_err() {
            Error::Json(e) => assert!(e.to_string().contains("missing field `uri`"), "{e}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_structured_body() {
        match api_error(403, r#"{"error": "Insert operations are not allowed", "code": "FORBIDDEN"}"#) {
            Error::Api {
                status,
                message,
                code,
            } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Insert operations are not allowed");
                assert_eq!(code.as_deref(), Some("FORBIDDEN"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_plain_body() {
        match api_error(502, "") {
            Error::Api { message, code, .. } => {
                assert_eq!(message, "Unknown error");
                assert!(code.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
