//! Logs command handler.

use mcpdeck_core::Request;

use super::respond;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, id: String, tail: Option<u32>) -> Result<(), CliError> {
    let reply = ctx.core().handle(Request::GetLogs { id, tail }).await;
    respond(ctx, reply, false).await
}
