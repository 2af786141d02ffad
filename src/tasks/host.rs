//! Task: detect the distribution release.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::platform::HostProfile;

/// Read the distribution version file and record the [`HostProfile`].
///
/// Detection only reads state, so it also runs in dry-run mode. A failure is
/// recorded on the context so later tasks can tell it apart from "not yet
/// detected".
#[derive(Debug)]
pub struct DetectHostProfile;

impl Task for DetectHostProfile {
    fn name(&self) -> &'static str {
        "Detect host profile"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        match HostProfile::detect(&ctx.config.distro, &ctx.config.etc_dir) {
            Ok(profile) => {
                ctx.log.info(&format!("detected {profile}"));
                ctx.set_host_profile(Some(profile));
                Ok(TaskResult::Ok)
            }
            Err(e) => {
                ctx.set_host_profile(None);
                Err(e.into())
            }
        }
    }
}
