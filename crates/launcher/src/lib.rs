//! Launching compiled commands.
//!
//! The compilers only describe what to run. A [`Launcher`] runs it: first
//! the best-effort setup steps, then the pipeline as one process chain. No
//! supervision, restart, or timeout is applied to what it starts.

pub mod dry_run;
mod interrupt;
pub mod launcher;
pub mod presence;
pub mod process;

pub use dry_run::DryRunLauncher;
pub use launcher::*;
pub use presence::{check_tools, command_exists, SystemToolPresence, ToolRole, ToolStatus};
pub use process::ProcessLauncher;
