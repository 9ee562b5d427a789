//! Catalog and instance listing handlers.

use mcpdeck_core::Request;

use super::respond;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// List catalog entries joined with their instances.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let reply = ctx.core().handle(Request::ListCatalog).await;
    respond(ctx, reply, false).await
}

/// List MCP server instances only.
pub async fn list_instances(ctx: &CliContext) -> Result<(), CliError> {
    let reply = ctx.core().handle(Request::ListInstances).await;
    respond(ctx, reply, false).await
}
