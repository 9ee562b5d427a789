//! JSON request bridge.
//!
//! Reads one request document, prints the response document, and with
//! `--wait` also prints the catalog as reconciled after the refresh. Output
//! is always JSON so that other front-ends can drive the engine through this
//! command.

use tokio::io::AsyncReadExt;

use mcpdeck_core::Request;

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, json: Option<String>, wait: bool) -> Result<(), CliError> {
    let text = match json {
        Some(text) => text,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };
    let request = Request::from_json(&text)?;

    let reply = ctx.core().handle(request).await;
    println!("{}", reply.response.to_json_pretty()?);
    if let Some(error) = reply.response.error() {
        return Err(CliError::Failed(error.to_string()));
    }

    if wait && let Some(plan) = &reply.refresh {
        let refreshed = ctx.core().settle_catalog(plan).await;
        println!("{}", refreshed.to_json_pretty()?);
    }
    Ok(())
}
