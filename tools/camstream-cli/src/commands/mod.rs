pub mod capture;
pub mod check;
pub mod play;

use camstream_launcher::{DryRunLauncher, Launcher, ProcessLauncher};

/// Launcher for the `--dry-run` choice.
pub(crate) fn launcher(dry_run: bool) -> Box<dyn Launcher> {
    if dry_run {
        Box::new(DryRunLauncher::new())
    } else {
        Box::new(ProcessLauncher::new())
    }
}
