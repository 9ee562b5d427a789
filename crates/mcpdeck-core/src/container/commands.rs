//! Argument vectors for the container runtime CLI.
//!
//! Every identifier is validated before it is placed in an argument vector.
//! Nothing here is ever joined into a shell string.

use crate::domain::{IdentifierError, validate_identifier};
use crate::ports::CommandSpec;

/// Record format for the instance listing: `id|name|image|status`.
pub const LIST_FORMAT: &str = "{{.ID}}|{{.Names}}|{{.Image}}|{{.Status}}";

/// Record format for the image listing: `id repository`.
pub const IMAGE_FORMAT: &str = "{{.ID}} {{.Repository}}";

/// Builds runtime commands for one runtime binary (`docker`, `podman`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCommands {
    binary: String,
}

impl RuntimeCommands {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn base(&self) -> CommandSpec {
        CommandSpec::new(&self.binary)
    }

    /// All instances, running or not.
    pub fn list_all(&self) -> CommandSpec {
        self.base().args(["ps", "-a", "--format", LIST_FORMAT])
    }

    pub fn start(&self, id: &str) -> Result<CommandSpec, IdentifierError> {
        let id = validate_identifier("container id", id)?;
        Ok(self.base().args(["start", id]))
    }

    pub fn stop(&self, id: &str) -> Result<CommandSpec, IdentifierError> {
        let id = validate_identifier("container id", id)?;
        Ok(self.base().args(["stop", id]))
    }

    pub fn restart(&self, id: &str) -> Result<CommandSpec, IdentifierError> {
        let id = validate_identifier("container id", id)?;
        Ok(self.base().args(["restart", id]))
    }

    pub fn remove(&self, name: &str) -> Result<CommandSpec, IdentifierError> {
        let name = validate_identifier("container name", name)?;
        Ok(self.base().args(["rm", name]))
    }

    pub fn logs(&self, id: &str, tail_lines: u32) -> Result<CommandSpec, IdentifierError> {
        let id = validate_identifier("container id", id)?;
        Ok(self
            .base()
            .args(["logs", "--tail"])
            .arg(tail_lines.to_string())
            .arg(id))
    }

    pub fn list_images(&self) -> CommandSpec {
        self.base().args(["images", "--format", IMAGE_FORMAT])
    }

    pub fn remove_image(&self, image_id: &str) -> Result<CommandSpec, IdentifierError> {
        let image_id = validate_identifier("image id", image_id)?;
        Ok(self.base().args(["rmi", "-f", image_id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docker() -> RuntimeCommands {
        RuntimeCommands::new("docker")
    }

    #[test]
    fn test_list_uses_pipe_format() {
        let spec = docker().list_all();
        assert_eq!(spec.program, "docker");
        assert_eq!(spec.args, vec!["ps", "-a", "--format", LIST_FORMAT]);
    }

    #[test]
    fn test_logs_tail_precedes_id() {
        let spec = docker().logs("abc123", 500).unwrap();
        assert_eq!(spec.args, vec!["logs", "--tail", "500", "abc123"]);
    }

    #[test]
    fn test_remove_image_is_forced() {
        let spec = docker().remove_image("sha256-1").unwrap();
        assert_eq!(spec.args, vec!["rmi", "-f", "sha256-1"]);
    }

    #[test]
    fn test_rejects_injection_attempts() {
        assert!(docker().stop("x; rm -rf /").is_err());
        assert!(docker().remove("--force").is_err());
        assert!(docker().start("").is_err());
        assert!(docker().logs("$(id)", 10).is_err());
    }
}
