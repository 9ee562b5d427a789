//! Start, stop, restart and remove handlers.
//!
//! These return as soon as the runtime command finishes; `ps` shows the
//! resulting state.

use mcpdeck_core::Request;

use super::respond;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn start(ctx: &CliContext, id: String) -> Result<(), CliError> {
    respond(ctx, ctx.core().handle(Request::Start { id }).await, false).await
}

pub async fn stop(ctx: &CliContext, id: String) -> Result<(), CliError> {
    respond(ctx, ctx.core().handle(Request::Stop { id }).await, false).await
}

pub async fn restart(ctx: &CliContext, id: String) -> Result<(), CliError> {
    respond(ctx, ctx.core().handle(Request::Restart { id }).await, false).await
}

/// Remove an instance, and with `remove_image` its image too.
pub async fn remove(ctx: &CliContext, container_name: String, remove_image: bool) -> Result<(), CliError> {
    let request = Request::Remove {
        container_name,
        remove_image,
    };
    respond(ctx, ctx.core().handle(request).await, false).await
}
