//! Helper utilities for common task patterns.
use anyhow::Result;

use super::{Context, TaskResult};
use crate::config::RemoteFile;
use crate::error::TaskError;
use crate::resources::Applicable as _;
use crate::resources::remote_file::RemoteFileResource;

/// Counters for tasks made of several independently reported steps.
///
/// # Examples
///
/// ```
/// use easy_debian::tasks::helpers::StepTally;
///
/// let mut tally = StepTally::default();
/// tally.record(true);
/// tally.record(false);
/// assert_eq!(tally.summary(false), "1 ok, 1 failed");
/// ```
#[derive(Debug, Default)]
pub struct StepTally {
    /// Steps that succeeded.
    pub succeeded: u32,
    /// Steps that failed.
    pub failed: u32,
    /// Steps left out (e.g. a missing input file).
    pub skipped: u32,
}

impl StepTally {
    /// Count one step and pass its outcome through.
    pub const fn record(&mut self, ok: bool) -> bool {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        ok
    }

    /// Format the summary string (e.g. "3 ok, 1 failed").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would run" } else { "ok" };
        let mut parts = vec![format!("{} {verb}", self.succeeded)];
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed));
        }
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        parts.join(", ")
    }

    /// Log the summary and turn the counters into a task outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::StepsFailed`] when any step failed.
    pub fn finish(self, ctx: &Context) -> Result<TaskResult> {
        ctx.log.info(&self.summary(ctx.dry_run));
        if self.failed > 0 {
            return Err(TaskError::StepsFailed {
                failed: self.failed,
                total: self.succeeded + self.failed,
            }
            .into());
        }
        Ok(if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        })
    }
}

/// Download `file`, backing up whatever was at its path.
///
/// # Errors
///
/// Returns an error if the download or the write fails; the local file is
/// untouched when the download fails.
pub fn fetch_remote(ctx: &Context, file: &RemoteFile) -> Result<()> {
    let path = file.path.display();
    let resource = RemoteFileResource::new(file, ctx.fetcher.as_ref());
    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("would fetch {}", resource.description()));
        return Ok(());
    }
    ctx.log.debug(&format!("fetching {}", resource.description()));
    if let Some(backup) = resource.apply()?.backup() {
        ctx.log.info(&format!(
            "Creating a backup of file: {path} executed successfully"
        ));
        ctx.log.debug(&format!("previous contents kept in {}", backup.display()));
    }
    ctx.log.info(&format!(
        "The file {} was downloaded and saved to {path}",
        file.url
    ));
    Ok(())
}

/// Like [`fetch_remote`] but reports a failure instead of returning it.
pub fn fetch_remote_step(ctx: &Context, file: &RemoteFile) -> bool {
    match fetch_remote(ctx, file) {
        Ok(()) => true,
        Err(e) => {
            ctx.log.error(&format!("{e:#}"));
            false
        }
    }
}
