//! Container runtime integration: command construction, output parsing and
//! read-only queries. Mutations are sequenced by the lifecycle orchestrator.

pub mod commands;
pub mod images;
pub mod inspector;
pub mod listing;

pub use commands::{IMAGE_FORMAT, LIST_FORMAT, RuntimeCommands};
pub use images::{find_image_id, image_pattern};
pub use inspector::RuntimeInspector;
pub use listing::{ListingParseError, parse_listing, parse_listing_line};

use crate::ports::{CommandExecutor, CommandOutput, CommandSpec, RunOptions, RuntimeError};

/// Run a runtime command, turning a non-zero exit into [`RuntimeError::NonZeroExit`].
pub(crate) async fn run_checked(
    executor: &dyn CommandExecutor,
    spec: &CommandSpec,
    options: &RunOptions,
) -> Result<CommandOutput, RuntimeError> {
    let output = executor.run(spec, options).await?;
    if output.is_success() {
        Ok(output)
    } else {
        Err(RuntimeError::NonZeroExit {
            command: spec.to_string(),
            code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
