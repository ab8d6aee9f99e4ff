//! Columnist MCP command-line client.
//!
//! Runs one tool call against a Columnist MCP server and prints the result as
//! JSON on stdout. Logs go to stderr.

use std::process::ExitCode;

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::{Context, bail};
use clap::Parser;
use dotenvy::dotenv;
use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use columnist_mcp_client::config::{AppConfig, Cli, Command};
use columnist_mcp_client::mcp::blocking;
use columnist_mcp_client::{Error, McpClient, Message, OrderBy, QueryOptions, SearchOptions};

/// A parsed subcommand, ready to send.
#[derive(Debug)]
enum Request {
    Query(QueryOptions),
    Search { query: String, options: SearchOptions },
    Insert(Message),
    Resources,
}

fn main() -> ExitCode {
    // Load .env (if present) before clap reads its env fallbacks
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_connection(&cli.connection).context("Configuration error")?;

    info!(
        name: "client.config.loaded",
        base_url = %config.server.base_url,
        database = %config.columnist.database,
        table = %config.columnist.table,
        blocking = cli.blocking,
        "Client configuration loaded"
    );

    let request = parse_request(cli.command)?;
    let output = if cli.blocking {
        run_blocking(&config, request)?
    } else {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?
            .block_on(run_async(&config, request))?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_async(config: &AppConfig, request: Request) -> anyhow::Result<Value> {
    let client = McpClient::new(&config.server.base_url, &config.server.auth_token)?;
    let table = client.table(&config.columnist.database, &config.columnist.table);

    let output = match request {
        Request::Query(options) => serde_json::to_value(table.query_as::<Value>(&options).await?)?,
        Request::Search { query, options } => {
            serde_json::to_value(table.search_as::<Value>(&query, &options).await?)?
        }
        Request::Insert(message) => serde_json::to_value(table.insert(&[message]).await?)?,
        Request::Resources => serde_json::to_value(client.list_resources().await?)?,
    };
    Ok(output)
}

fn run_blocking(config: &AppConfig, request: Request) -> anyhow::Result<Value> {
    let client = blocking::McpClient::new(&config.server.base_url, &config.server.auth_token)?;
    let table = client.table(&config.columnist.database, &config.columnist.table);

    let output = match request {
        Request::Query(options) => serde_json::to_value(table.query_as::<Value>(&options)?)?,
        Request::Search { query, options } => {
            serde_json::to_value(table.search_as::<Value>(&query, &options)?)?
        }
        Request::Insert(message) => serde_json::to_value(table.insert(&[message])?)?,
        Request::Resources => serde_json::to_value(client.list_resources()?)?,
    };
    Ok(output)
}

fn parse_request(command: Command) -> anyhow::Result<Request> {
    Ok(match command {
        Command::Query {
            conditions,
            order_by,
            desc,
            limit,
            offset,
        } => Request::Query(QueryOptions {
            conditions: conditions
                .as_deref()
                .map(|raw| json_object("where", raw))
                .transpose()?,
            order_by: order_by.map(|field| {
                if desc {
                    OrderBy::desc(field)
                } else {
                    OrderBy::asc(field)
                }
            }),
            limit,
            offset,
            extra: Map::new(),
        }),
        Command::Search {
            query,
            filters,
            limit,
        } => Request::Search {
            query,
            options: SearchOptions {
                filters: filters
                    .as_deref()
                    .map(|raw| json_object("filters", raw))
                    .transpose()?,
                limit,
                extra: Map::new(),
            },
        },
        Command::Insert {
            content,
            user_id,
            id,
            metadata,
        } => {
            let id = id.unwrap_or_else(|| format!("msg-{}", Uuid::new_v4()));
            let mut message = Message::new(id, content, user_id);
            message.metadata = metadata
                .as_deref()
                .map(|raw| json_object("metadata", raw))
                .transpose()?;
            Request::Insert(message)
        }
        Command::Resources => Request::Resources,
    })
}

fn json_object(flag: &str, raw: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).with_context(|| format!("--{flag} is not valid JSON"))? {
        Value::Object(map) => Ok(map),
        other => bail!("--{flag} must be a JSON object, got {other}"),
    }
}

fn report(err: &anyhow::Error) {
    let client_err = err.downcast_ref::<Error>();
    error!(
        name: "client.request.failed",
        status = ?client_err.and_then(Error::status),
        "Request failed"
    );

    eprintln!("Error: {err:#}");
    if let Some(hint) = client_err.and_then(Error::failure).and_then(|f| f.hint()) {
        eprintln!("{hint}");
    }
}
