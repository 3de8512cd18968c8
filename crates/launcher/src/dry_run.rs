//! A launcher that only reports what it would run.

use std::sync::{Mutex, PoisonError};

use camstream_common::error::CamstreamResult;
use camstream_model::{Invocation, ProcessChain};

use crate::launcher::{LaunchOutcome, Launcher, SetupOutcome};

/// Records every command line instead of spawning it. Every step "succeeds".
#[derive(Debug, Default)]
pub struct DryRunLauncher {
    commands: Mutex<Vec<String>>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command lines in the order they would have run.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, line: String) {
        tracing::info!(command = %line, "Dry run");
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

#[async_trait::async_trait]
impl Launcher for DryRunLauncher {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn run_setup(&self, steps: &[Invocation]) -> Vec<SetupOutcome> {
        steps
            .iter()
            .map(|step| {
                self.record(step.to_string());
                SetupOutcome::succeeded(step)
            })
            .collect()
    }

    async fn launch(&self, chain: &ProcessChain) -> CamstreamResult<LaunchOutcome> {
        self.record(chain.to_string());
        Ok(LaunchOutcome::Exited(0))
    }
}
