//! Task: download shell and editor rc files.
use anyhow::Result;

use super::helpers::{StepTally, fetch_remote_step};
use super::{Context, Task, TaskResult};

/// Fetch every configured dotfile, backing up the file it replaces.
#[derive(Debug)]
pub struct InstallDotfiles;

impl Task for InstallDotfiles {
    fn name(&self) -> &'static str {
        "Install dotfiles"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.dotfiles.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut tally = StepTally::default();
        for file in &ctx.config.dotfiles {
            tally.record(fetch_remote_step(ctx, file));
        }
        tally.finish(ctx)
    }
}
