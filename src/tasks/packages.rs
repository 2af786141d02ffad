//! Task: refresh, upgrade and install a package group.
use anyhow::{Result, bail};

use super::{Context, NO_HOST_PROFILE, Task, TaskResult, task_deps};
use crate::config::packages::{KERNEL_PLACEHOLDER, PackageGroup, resolve};
use crate::platform::{Distro, HostProfile};
use crate::resources::package;

/// Install one of the release's package groups with aptitude.
///
/// Update and upgrade outcomes are only reported; the task fails when the
/// install itself fails.
#[derive(Debug)]
pub struct InstallPackages {
    group: PackageGroup,
}

impl InstallPackages {
    /// Task installing `group`.
    #[must_use]
    pub const fn new(group: PackageGroup) -> Self {
        Self { group }
    }
}

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        match self.group {
            PackageGroup::Base => "Install base packages",
            PackageGroup::Tools => "Install tool packages",
        }
    }

    task_deps![super::host::DetectHostProfile];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.distro.parse::<Distro>().ok() == Some(Distro::Debian)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(codename) = ctx.host_profile().and_then(HostProfile::codename) else {
            return Ok(TaskResult::Skipped(NO_HOST_PROFILE.to_string()));
        };
        let Some(groups) = ctx.config.packages.for_codename(codename.as_str()) else {
            return Ok(TaskResult::Skipped(format!("no packages listed for {codename}")));
        };
        let declared = groups.get(self.group);
        if declared.is_empty() {
            return Ok(TaskResult::Skipped(format!("{} list is empty", self.group)));
        }

        let kernel = if declared.iter().any(|n| n.contains(KERNEL_PLACEHOLDER)) {
            let kernel = ctx.kernel_release();
            if kernel.is_none() {
                ctx.log
                    .warn("kernel release unknown, leaving out kernel-specific packages");
            }
            kernel
        } else {
            None
        };
        let names = resolve(declared, kernel);

        ctx.run_command(&package::update());
        ctx.run_command(&package::safe_upgrade());
        let label = self.group.to_string();
        if !ctx.run_command(&package::install(&names, &label)) {
            bail!("aptitude could not install the {label}");
        }
        Ok(if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        })
    }
}
