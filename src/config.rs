use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::columnist::MESSAGES_TABLE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/mcp";
pub const DEFAULT_DATABASE: &str = "my-app";

#[derive(Parser, Debug)]
#[command(author, version, about = "Query, search and insert Columnist messages over MCP", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Use the blocking client instead of the async one
    #[arg(long, global = true)]
    pub blocking: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    /// MCP mount point (e.g. http://localhost:3000/mcp)
    #[arg(long, env = "MCP_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "MCP_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Database name
    #[arg(long, env = "MCP_DATABASE", global = true)]
    pub database: Option<String>,

    /// Table name
    #[arg(long, global = true)]
    pub table: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Query rows (columnist_query)
    Query {
        /// Filter conditions as a JSON object
        #[arg(long = "where", value_name = "JSON")]
        conditions: Option<String>,
        /// Field to sort by
        #[arg(long)]
        order_by: Option<String>,
        /// Sort descending
        #[arg(long, requires = "order_by")]
        desc: bool,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        offset: Option<u64>,
    },
    /// Full-text search (columnist_search)
    Search {
        query: String,
        /// Additional filters as a JSON object
        #[arg(long, value_name = "JSON")]
        filters: Option<String>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Insert one message (columnist_insert)
    Insert {
        #[arg(long)]
        content: String,
        #[arg(long)]
        user_id: String,
        /// Message id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Metadata as a JSON object
        #[arg(long, value_name = "JSON")]
        metadata: Option<String>,
    },
    /// List the server's resources
    Resources,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub columnist: ColumnistConfig,
}

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    #[serde(default)]
    pub auth_token: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ColumnistConfig {
    pub database: String,
    pub table: String,
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_connection(&cli.connection)
    }

    /// Priority: CLI flag > CLI env var > `COLUMNIST_` env > config file > defaults.
    pub fn from_connection(args: &ConnectionArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.base_url", DEFAULT_BASE_URL)?
            .set_default("columnist.database", DEFAULT_DATABASE)?
            .set_default("columnist.table", MESSAGES_TABLE)?;

        builder = match &args.config {
            Some(path) => builder.add_source(File::with_name(path)),
            // ./columnist.{yaml,toml,json} if present
            None => builder.add_source(File::with_name("columnist").required(false)),
        };

        // e.g. COLUMNIST_SERVER__AUTH_TOKEN=...
        builder = builder.add_source(
            Environment::with_prefix("COLUMNIST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(url) = &args.base_url {
            builder = builder.set_override("server.base_url", url.as_str())?;
        }
        if let Some(token) = &args.token {
            builder = builder.set_override("server.auth_token", token.as_str())?;
        }
        if let Some(database) = &args.database {
            builder = builder.set_override("columnist.database", database.as_str())?;
        }
        if let Some(table) = &args.table {
            builder = builder.set_override("columnist.table", table.as_str())?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        if cfg.server.auth_token.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "missing auth token: pass --token, set MCP_TOKEN or COLUMNIST_SERVER__AUTH_TOKEN"
                    .to_string(),
            ));
        }
        Ok(cfg)
    }
}
