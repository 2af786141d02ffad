//! Task: convert downloaded files to Unix line endings.
use anyhow::Result;

use super::helpers::StepTally;
use super::{Context, Task, TaskResult};
use crate::resources::line_endings::dos2unix;

/// Run `dos2unix` on each configured file.
#[derive(Debug)]
pub struct NormalizeLineEndings;

impl Task for NormalizeLineEndings {
    fn name(&self) -> &'static str {
        "Normalize line endings"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.normalize.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.dry_run && !ctx.executor.which("dos2unix") {
            return Ok(TaskResult::Skipped("dos2unix not found".to_string()));
        }

        let mut tally = StepTally::default();
        for path in &ctx.config.normalize {
            if !ctx.dry_run && !path.exists() {
                ctx.log
                    .warn(&format!("{} not found, skipping", path.display()));
                tally.skipped += 1;
                continue;
            }
            tally.record(ctx.run_command(&dos2unix(path)));
        }
        tally.finish(ctx)
    }
}
