//! Config command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the effective configuration after flags and environment are applied.
pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(ctx.core().config())?);
    Ok(())
}
