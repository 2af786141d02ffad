//! Task: replace the crontab with the downloaded template.
use anyhow::Result;

use super::helpers::{StepTally, fetch_remote_step};
use super::{Context, Task, TaskResult};
use crate::resources::backup::write_with_backup;
use crate::resources::crontab;

/// Fetch the crontab template, save and clear any installed crontab, then
/// load the template.
#[derive(Debug)]
pub struct ConfigureCrontab;

impl ConfigureCrontab {
    /// Save `current` to the backup file and clear the installed crontab.
    fn replace_current(ctx: &Context, current: &str, tally: &mut StepTally) {
        let backup = &ctx.config.crontab.backup;
        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would save the current crontab to {}",
                backup.display()
            ));
        } else {
            match write_with_backup(backup, current.as_bytes()) {
                Ok(_) => {
                    tally.record(true);
                    ctx.log.info(&format!(
                        "Creating a backup of the crontab: {} executed successfully",
                        backup.display()
                    ));
                }
                Err(e) => {
                    tally.record(false);
                    ctx.log.error(&format!("{e:#}"));
                }
            }
        }
        tally.record(ctx.run_command(&crontab::clear()));
    }
}

impl Task for ConfigureCrontab {
    fn name(&self) -> &'static str {
        "Configure crontab"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.crontab.url.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let template = ctx.config.crontab.template();
        let mut tally = StepTally::default();
        tally.record(fetch_remote_step(ctx, &template));

        match crontab::current(ctx.executor.as_ref()) {
            Some(current) => Self::replace_current(ctx, &current, &mut tally),
            None => ctx.log.info("no crontab installed, nothing to back up"),
        }

        tally.record(ctx.run_command(&crontab::load(&template.path)));
        tally.finish(ctx)
    }
}
