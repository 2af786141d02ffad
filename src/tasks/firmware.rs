//! Task: clone the firmware repository and copy it into place.
use anyhow::Result;

use super::helpers::StepTally;
use super::{Context, Task, TaskResult};
use crate::error::ResourceError;
use crate::resources::backup::backup_dir;
use crate::resources::git_repo;

/// Back up any previous clone, clone afresh and copy the result to the
/// firmware directory.
#[derive(Debug)]
pub struct InstallFirmware;

impl Task for InstallFirmware {
    fn name(&self) -> &'static str {
        "Install firmware"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.firmware.url.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let cfg = &ctx.config.firmware;
        let path = cfg.path.as_path();
        let mut tally = StepTally::default();

        if ctx.dry_run {
            if path.is_dir() {
                ctx.log
                    .dry_run(&format!("would back up {}", path.display()));
            }
        } else if let Some(bkp) = backup_dir(path)? {
            ctx.log.info(&format!(
                "Creating a backup of directory: {} executed successfully",
                bkp.display()
            ));
        }

        let cloned =
            tally.record(ctx.run_command(&git_repo::clone(&cfg.url, path, &cfg.label)));

        if cfg.copy_to.is_empty() {
            return tally.finish(ctx);
        }
        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would copy the {} to {}",
                cfg.label, cfg.copy_to
            ));
            return tally.finish(ctx);
        }
        if !cloned {
            ctx.log
                .warn(&format!("clone failed, not copying into {}", cfg.copy_to));
            return tally.finish(ctx);
        }
        if !path.is_dir() {
            return Err(ResourceError::NotFound {
                resource: format!("{} at {}", cfg.label, path.display()),
            }
            .into());
        }

        match git_repo::copy_plan(path, &cfg.copy_to, &cfg.label)? {
            Some(spec) => {
                tally.record(ctx.run_command(&spec));
            }
            None => ctx
                .log
                .warn(&format!("nothing to copy into {}", cfg.copy_to)),
        }
        tally.finish(ctx)
    }
}
