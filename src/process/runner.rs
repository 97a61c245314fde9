use std::future::Future;
use std::process::Stdio;

use tracing::{debug, info};

use crate::{
    command::ExternalCommand,
    error::{CompositorError, Result},
};

/// Runs one external command to completion
///
/// Implementations must not return before the process has exited. The
/// orchestrator relies on that to keep the overlay and embed steps strictly
/// sequential.
pub trait ProcessRunner: Send + Sync {
    /// Resolve on exit status 0, fail with [`CompositorError::CommandFailed`]
    /// on any other exit and [`CompositorError::SpawnError`] when the
    /// process could not be started.
    fn run(&self, command: &ExternalCommand) -> impl Future<Output = Result<()>> + Send;
}

/// Launches commands as real child processes.
///
/// The child shares our stdin, stdout and stderr, so the tool's own
/// diagnostics go straight to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    /// Check whether `program` can be launched at all
    pub async fn is_available(program: &str) -> bool {
        tokio::process::Command::new(program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<()> {
        debug!("Launching: {}", command);

        let mut process = command.to_process_command();
        let status = process
            .status()
            .await
            .map_err(|source| CompositorError::SpawnError {
                program: command.program().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(CompositorError::CommandFailed {
                program: command.program().to_string(),
                code: status.code(),
            });
        }

        info!("{} finished successfully", command.program());
        Ok(())
    }
}
