//! In-process mock of a Columnist MCP server.
//!
//! Runs on its own thread and runtime so both the async and the blocking
//! clients can talk to it. Every request is recorded for inspection.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::post,
};
use columnist_mcp_client::mcp::types::CallToolResult;
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";
pub const DATABASE: &str = "my-app";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    requests: Recorded,
}

impl MockServer {
    pub fn start() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener
            .set_nonblocking(true)
            .expect("set mock listener non-blocking");
        let addr = listener.local_addr().expect("mock server address");

        let requests: Recorded = Arc::default();
        let state = Arc::clone(&requests);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock server runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio mock listener");
                let app = Router::new()
                    .route("/mcp/tools/call", post(tools_call))
                    .route("/mcp/resources/list", post(resources_list))
                    .with_state(state);
                axum::serve(listener, app).await.expect("mock server");
            });
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/mcp", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

/// The resources array the mock advertises.
pub fn advertised_resources() -> Value {
    json!([
        {
            "name": "Database Schema",
            "uri": "mcp://columnist/my-app/schema/",
            "description": "Complete database schema definition",
            "mimeType": "application/json"
        },
        {
            "name": "messages Table",
            "uri": "mcp://columnist/my-app/messages/",
            "description": "All records in the messages table",
            "mimeType": "application/json",
            "annotations": { "priority": 0.5 }
        }
    ])
}

pub fn sample_row(id: &str) -> Value {
    json!({
        "id": id,
        "content": "hello world",
        "userId": "user-123",
        "timestamp": "2024-03-01T12:30:00.000Z",
        "metadata": { "source": "mock" },
        "channel": "general"
    })
}

/// Rows of the `notes` table, which are not shaped like messages.
pub fn note_rows() -> Value {
    json!([
        { "id": "n1", "title": "groceries", "done": false },
        { "id": "n2", "title": "taxes", "done": true }
    ])
}

fn record(requests: &Recorded, uri: &Uri, headers: &HeaderMap, body: &Bytes) {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body: Option<Value> = (!body.is_empty())
        .then(|| serde_json::from_slice(body).expect("request body is JSON"));
    requests.lock().expect("requests lock").push(RecordedRequest {
        path: uri.path().to_string(),
        authorization: text(header::AUTHORIZATION),
        content_type: text(header::CONTENT_TYPE),
        body,
    });
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let expected = format!("Bearer {TOKEN}");
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    (!ok).then(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid token", "code": "AUTH_FAILED" })),
        )
            .into_response()
    })
}

fn envelope(payload: &Value) -> Response {
    let result = CallToolResult::from_payload(payload).expect("encode payload");
    Json(serde_json::to_value(result).expect("encode envelope")).into_response()
}

async fn tools_call(
    State(requests): State<Recorded>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&requests, &uri, &headers, &body);
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }

    let call: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let args = &call["arguments"];

    match call["name"].as_str().unwrap_or_default() {
        "columnist_query" if args["table"] == "notes" => envelope(&note_rows()),
        "columnist_query" => envelope(&json!({
            "data": [sample_row("msg-1"), sample_row("msg-2")],
            "total": 2,
            "limit": args.get("limit"),
            "offset": args.get("offset")
        })),
        "columnist_search" => envelope(&json!([sample_row("msg-7")])),
        "columnist_insert" => {
            let ids: Vec<Value> = args["records"]
                .as_array()
                .map(|records| records.iter().map(|r| r["id"].clone()).collect())
                .unwrap_or_default();
            envelope(&json!({ "success": true, "insertedIds": ids }))
        }
        "forbidden" => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Access to table secrets is not allowed",
                "code": "FORBIDDEN"
            })),
        )
            .into_response(),
        "rate_limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests", "code": "RATE_LIMITED" })),
        )
            .into_response(),
        "crash" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "broken" => Json(json!({ "content": [{ "type": "text", "text": "not json" }] }))
            .into_response(),
        "failing" => Json(json!({
            "content": [{ "type": "text", "text": "Database nope not found" }],
            "isError": true
        }))
        .into_response(),
        // anything else echoes its arguments back
        _ => envelope(args),
    }
}

async fn resources_list(
    State(requests): State<Recorded>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&requests, &uri, &headers, &body);
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    Json(json!({ "resources": advertised_resources() })).into_response()
}
