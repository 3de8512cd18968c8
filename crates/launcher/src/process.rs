//! Launching real processes with tokio.

use std::process::Stdio;

use camstream_common::error::{CamstreamError, CamstreamResult, EXIT_FAILURE};
use camstream_model::{Invocation, ProcessChain};
use tokio::process::{Child, Command};

use crate::interrupt::InterruptListener;
use crate::launcher::{LaunchOutcome, Launcher, SetupOutcome};

/// Spawns every invocation as a child process.
///
/// Children inherit stderr, the last one also inherits stdout. Children are
/// killed when the launcher stops waiting on them, so an error halfway
/// through starting a chain does not leak the processes already started.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Launcher for ProcessLauncher {
    fn name(&self) -> &str {
        "process"
    }

    async fn run_setup(&self, steps: &[Invocation]) -> Vec<SetupOutcome> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for step in steps {
            tracing::debug!(command = %step, "Running setup step");
            let result = Command::new(&step.program)
                .args(&step.args)
                .stdin(Stdio::null())
                .output()
                .await;

            let outcome = match result {
                Ok(output) if output.status.success() => SetupOutcome::succeeded(step),
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    tracing::warn!(
                        command = %step,
                        code = ?output.status.code(),
                        stderr = %stderr,
                        "Setup step failed, continuing"
                    );
                    SetupOutcome::failed(step, output.status.code(), stderr)
                }
                Err(e) => {
                    tracing::warn!(command = %step, error = %e, "Setup step could not start, continuing");
                    SetupOutcome::failed(step, None, e.to_string())
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn launch(&self, chain: &ProcessChain) -> CamstreamResult<LaunchOutcome> {
        let mut interrupt = InterruptListener::arm();
        let mut children = spawn_chain(chain)?;

        let finished = tokio::select! {
            biased;
            _ = interrupt.recv() => None,
            result = wait_chain(&mut children) => Some(result),
        };

        // A terminal Ctrl-C reaches the children too, so the chain often
        // ends on its own at the same moment.
        let interrupted = match finished {
            None => true,
            Some(_) => interrupt.received().await,
        };

        match finished {
            Some(result) if !interrupted => {
                let code = result?;
                tracing::info!(code, "Pipeline exited");
                Ok(LaunchOutcome::Exited(code))
            }
            _ => {
                tracing::info!("Interrupted, stopping pipeline");
                terminate(&mut children).await;
                Ok(LaunchOutcome::Interrupted)
            }
        }
    }
}

fn spawn_chain(chain: &ProcessChain) -> CamstreamResult<Vec<Child>> {
    let count = chain.len();
    let mut children: Vec<Child> = Vec::with_capacity(count);
    let mut upstream: Option<Stdio> = None;

    for (index, invocation) in chain.processes().iter().enumerate() {
        let piped = index + 1 < count;
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).kill_on_drop(true);
        if let Some(stdin) = upstream.take() {
            command.stdin(stdin);
        }
        if piped {
            command.stdout(Stdio::piped());
        }

        let mut child = command.spawn().map_err(|e| {
            CamstreamError::launch(format!("Failed to start {}: {e}", invocation.program))
        })?;
        tracing::debug!(program = %invocation.program, pid = ?child.id(), "Started process");

        if piped {
            let stdout = child.stdout.take().ok_or_else(|| {
                CamstreamError::launch(format!("{} has no stdout to pipe", invocation.program))
            })?;
            let stdio: Stdio = stdout.try_into().map_err(|e: std::io::Error| {
                CamstreamError::launch(format!(
                    "Failed to pipe {} into the next process: {e}",
                    invocation.program
                ))
            })?;
            upstream = Some(stdio);
        }
        children.push(child);
    }

    Ok(children)
}

/// Wait for the last process, then reap the ones feeding it. Upstream
/// producers still running at that point have nobody to write to.
async fn wait_chain(children: &mut [Child]) -> CamstreamResult<i32> {
    let Some((last, upstream)) = children.split_last_mut() else {
        return Ok(0);
    };

    let status = last.wait().await?;
    for child in upstream.iter_mut() {
        if matches!(child.try_wait(), Ok(None)) {
            tracing::debug!(pid = ?child.id(), "Stopping upstream process");
            if let Err(e) = child.start_kill() {
                tracing::debug!(error = %e, "Upstream process already gone");
            }
        }
        child.wait().await?;
    }

    Ok(status.code().unwrap_or(EXIT_FAILURE))
}

async fn terminate(children: &mut [Child]) {
    for child in children.iter_mut() {
        if let Err(e) = child.kill().await {
            tracing::debug!(pid = ?child.id(), error = %e, "Process already exited");
        }
    }
}
