//! Serve command: MCP server over stdio.

use anyhow::Context;
use clap::Args;
use lexup_core::Session;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use crate::server::LexupServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP tools on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    session: Session,
) -> anyhow::Result<()> {
    info!(?max_input_bytes, "starting MCP server on stdio");
    let service = LexupServer::new(session, max_input_bytes)
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server stopped unexpectedly")?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
