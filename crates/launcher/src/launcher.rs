//! The launcher abstraction and plan execution helpers.

use camstream_capture::CommandPlan;
use camstream_common::error::{CamstreamResult, EXIT_INTERRUPTED};
use camstream_model::{Invocation, ProcessChain};
use camstream_playback::PlayerInvocation;
use serde::Serialize;

/// Result of one best-effort setup step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupOutcome {
    pub invocation: Invocation,
    pub status: SetupStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SetupStatus {
    Succeeded,
    /// The step ran and exited non-zero, or could not be started at all
    /// (`exit_code` is `None` then).
    Failed {
        exit_code: Option<i32>,
        message: String,
    },
}

impl SetupOutcome {
    pub fn succeeded(invocation: &Invocation) -> Self {
        Self {
            invocation: invocation.clone(),
            status: SetupStatus::Succeeded,
        }
    }

    pub fn failed(invocation: &Invocation, exit_code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            invocation: invocation.clone(),
            status: SetupStatus::Failed {
                exit_code,
                message: message.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, SetupStatus::Succeeded)
    }
}

/// How a launched chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchOutcome {
    /// The last process of the chain exited with this code.
    Exited(i32),
    /// The user interrupted the run and the chain was torn down.
    Interrupted,
}

impl LaunchOutcome {
    /// Process exit code the front end should mirror.
    pub fn exit_code(self) -> i32 {
        match self {
            LaunchOutcome::Exited(code) => code,
            LaunchOutcome::Interrupted => EXIT_INTERRUPTED,
        }
    }

    pub fn is_success(self) -> bool {
        self == LaunchOutcome::Exited(0)
    }
}

/// Runs compiled commands.
#[async_trait::async_trait]
pub trait Launcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run every step in order. A failing step never stops the ones after it.
    async fn run_setup(&self, steps: &[Invocation]) -> Vec<SetupOutcome>;

    /// Start the chain with each process's stdout feeding the next one's
    /// stdin, and wait until it ends or the user interrupts it.
    async fn launch(&self, chain: &ProcessChain) -> CamstreamResult<LaunchOutcome>;
}

/// Everything that happened while executing a capture plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanExecution {
    pub setup: Vec<SetupOutcome>,
    pub outcome: LaunchOutcome,
}

impl PlanExecution {
    pub fn failed_setup(&self) -> impl Iterator<Item = &SetupOutcome> {
        self.setup.iter().filter(|outcome| !outcome.is_success())
    }
}

/// Apply the plan's device controls, then launch its pipeline.
pub async fn execute_plan<L>(launcher: &L, plan: &CommandPlan) -> CamstreamResult<PlanExecution>
where
    L: Launcher + ?Sized,
{
    let steps = plan.setup_invocations();
    let setup = if steps.is_empty() {
        Vec::new()
    } else {
        let outcomes = launcher.run_setup(&steps).await;
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            launcher = launcher.name(),
            attempted = outcomes.len(),
            failed,
            "Applied device controls"
        );
        outcomes
    };

    let outcome = launcher.launch(plan.pipeline()).await?;
    Ok(PlanExecution { setup, outcome })
}

/// Launch a compiled player command.
pub async fn execute_player<L>(launcher: &L, player: &PlayerInvocation) -> CamstreamResult<LaunchOutcome>
where
    L: Launcher + ?Sized,
{
    tracing::info!(
        launcher = launcher.name(),
        player = player.player.binary(),
        url = %player.url,
        "Starting player"
    );
    launcher.launch(&player.chain()).await
}
