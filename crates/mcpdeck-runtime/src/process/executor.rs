//! `CommandExecutor` backed by `tokio::process`.
//!
//! Commands are spawned from a program plus argument vector (never through a
//! shell), with stdin closed and both output streams captured concurrently
//! under a shared byte budget.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use mcpdeck_core::ports::{CommandExecutor, CommandOutput, CommandSpec, ExecError, RunOptions};

const READ_CHUNK: usize = 8 * 1024;

/// Why collecting a child's output stopped early.
enum Collect {
    Overflow,
    Io(std::io::Error),
}

/// Runs commands as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCommandExecutor;

impl ProcessCommandExecutor {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn run(&self, spec: &CommandSpec, options: &RunOptions) -> Result<CommandOutput, ExecError> {
        let program = spec.program.clone();
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %spec, "Spawning process");
        let mut child = cmd.spawn().map_err(|e| ExecError::Launch {
            program: program.clone(),
            reason: e.to_string(),
        })?;

        let limit = options.max_output_bytes;
        let collected = match options.timeout {
            Some(timeout) => {
                if let Ok(result) = tokio::time::timeout(timeout, collect(&mut child, limit)).await {
                    result
                } else {
                    terminate(&mut child, &program).await;
                    return Err(ExecError::TimedOut {
                        program,
                        after_secs: timeout.as_secs(),
                    });
                }
            }
            None => collect(&mut child, limit).await,
        };

        match collected {
            Ok((status, stdout, stderr)) => {
                let output = CommandOutput {
                    exit_code: status.code(),
                    stdout: String::from_utf8_lossy(&stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                };
                debug!(command = %spec, exit_code = ?output.exit_code, "Process finished");
                Ok(output)
            }
            Err(Collect::Overflow) => {
                terminate(&mut child, &program).await;
                Err(ExecError::OutputLimitExceeded { program, limit })
            }
            Err(Collect::Io(e)) => {
                terminate(&mut child, &program).await;
                Err(ExecError::Launch {
                    program,
                    reason: format!("failed to read output: {e}"),
                })
            }
        }
    }
}

/// Drain stdout and stderr together, then reap the child.
async fn collect(child: &mut Child, limit: usize) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), Collect> {
    let used = AtomicUsize::new(0);
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (stdout, stderr) = tokio::try_join!(
        read_capped(stdout, &used, limit),
        read_capped(stderr, &used, limit)
    )?;
    let status = child.wait().await.map_err(Collect::Io)?;
    Ok((status, stdout, stderr))
}

async fn read_capped<R>(reader: Option<R>, used: &AtomicUsize, limit: usize) -> Result<Vec<u8>, Collect>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await.map_err(Collect::Io)?;
        if n == 0 {
            return Ok(out);
        }
        if used.fetch_add(n, Ordering::Relaxed) + n > limit {
            return Err(Collect::Overflow);
        }
        out.extend_from_slice(&chunk[..n]);
    }
}

async fn terminate(child: &mut Child, program: &str) {
    if let Err(e) = child.kill().await {
        warn!(program, error = %e, "Failed to kill child process");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh").args(["-c", script])
    }

    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let output = ProcessCommandExecutor
            .run(&sh("echo out; echo err >&2"), &RunOptions::default())
            .await
            .unwrap();
        assert!(output.is_success());
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_a_result() {
        let output = ProcessCommandExecutor
            .run(&sh("echo nope >&2; exit 3"), &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr.trim(), "nope");
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let err = ProcessCommandExecutor
            .run(
                &CommandSpec::new("mcpdeck-definitely-not-installed"),
                &RunOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Launch { .. }));
    }

    #[tokio::test]
    async fn test_output_cap_counts_both_streams() {
        let options = RunOptions::default().with_max_output(16);
        let err = ProcessCommandExecutor
            .run(&sh("printf '0123456789'; printf '0123456789' >&2"), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::OutputLimitExceeded { limit: 16, .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let options = RunOptions::default().with_timeout(Some(Duration::from_millis(200)));
        let err = ProcessCommandExecutor
            .run(&sh("sleep 5"), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let spec = sh("pwd").current_dir(dir.path());
        let output = ProcessCommandExecutor
            .run(&spec, &RunOptions::default())
            .await
            .unwrap();
        let reported = std::path::PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_expanded() {
        let output = ProcessCommandExecutor
            .run(
                &CommandSpec::new("echo").arg("$HOME; rm -rf /"),
                &RunOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(output.stdout, "$HOME; rm -rf /\n");
    }
}
