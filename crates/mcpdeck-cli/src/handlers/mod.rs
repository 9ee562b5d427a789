//! Command handlers that delegate to `FleetCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Build a `Request` from CLI input
//!   2. Call `FleetCore::handle`
//!   3. Format the reply for the terminal (or as JSON with `--json`)
//!
//! Handlers should NOT spawn processes or touch settings files directly.

pub mod catalog;
pub mod config;
pub mod deploy;
pub mod lifecycle;
pub mod logs;
pub mod paths;
pub mod request;
pub mod settings;

use mcpdeck_core::{Reply, Response};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_response;

/// Print a reply, optionally await its refresh, and turn a reported failure
/// into a non-zero exit.
///
/// Waiting prints the catalog reconciled against the settled listing.
pub async fn respond(ctx: &CliContext, reply: Reply, wait: bool) -> Result<(), CliError> {
    emit(ctx, &reply.response)?;
    if let Some(error) = reply.response.error() {
        return Err(CliError::Failed(error.to_string()));
    }

    if wait && let Some(plan) = &reply.refresh {
        if !ctx.json() {
            println!("\nWaiting for the runtime to settle...\n");
        }
        let refreshed = ctx.core().settle_catalog(plan).await;
        emit(ctx, &refreshed)?;
        if let Some(error) = refreshed.error() {
            return Err(CliError::Failed(error.to_string()));
        }
    }
    Ok(())
}

fn emit(ctx: &CliContext, response: &Response) -> Result<(), CliError> {
    if ctx.json() {
        println!("{}", response.to_json_pretty()?);
    } else {
        print_response(response);
    }
    Ok(())
}
