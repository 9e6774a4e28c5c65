//! MCP server for Trello API integration.
//!
//! This binary provides a Model Context Protocol (MCP) server that exposes
//! Trello operations as tools for AI assistants.
//!
//! # Usage
//!
//! Set the `TRELLO_API_KEY` and `TRELLO_TOKEN` environment variables and run:
//!
//! ```bash
//! export TRELLO_API_KEY="your-api-key"
//! export TRELLO_TOKEN="your-member-token"
//! trellomcp
//! ```
//!
//! The server communicates via STDIO using the MCP protocol. Pass
//! `--schemas [filter]` to print tool input schemas instead of serving.

mod schema;

use rmcp::{transport::stdio, ServiceExt};
use trellomcp::{Config, TrelloClient, TrelloServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    if let Some(arg) = args.next() {
        if arg == "--schemas" {
            schema::dump_schemas(args.next().as_deref());
            return Ok(());
        }
    }

    // Configuration problems are the only fatal condition; bail before
    // serving anything.
    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        build = concat!(env!("BUILD_GIT_SHA"), env!("BUILD_GIT_DIRTY")),
        date = env!("BUILD_DATE"),
        "starting trellomcp"
    );

    let client = TrelloClient::new(&config)?;
    let server = TrelloServer::new(client);

    // Create STDIO transport and serve
    let service = server.serve(stdio()).await?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr: stdout carries the MCP transport. `RUST_LOG` overrides
/// the configured level when set.
fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
