//! Named provisioning steps, run in a fixed order.
pub mod context;
pub mod crontab;
pub mod dotfiles;
pub mod firmware;
pub mod helpers;
pub mod host;
pub mod keyrings;
pub mod line_endings;
pub mod packages;
pub mod repositories;

/// Implement [`Task::dependencies`] for the listed task structs.
///
/// ```ignore
/// task_deps![super::host::DetectHostProfile]
/// ```
macro_rules! task_deps {
    [$($dep:ty),+ $(,)?] => {
        fn dependencies(&self) -> &[std::any::TypeId] {
            const DEPS: &[std::any::TypeId] = &[$(std::any::TypeId::of::<$dep>()),+];
            DEPS
        }
    };
}

pub(crate) use task_deps;

pub use context::Context;

use std::any::TypeId;

use anyhow::Result;

use crate::config::packages::PackageGroup;
use crate::logging::TaskStatus;

/// Reason given by tasks that need a detected release.
pub const NO_HOST_PROFILE: &str = "no supported host profile";

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use easy_debian::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("dos2unix not found".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (e.g. a required tool or input is missing).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// A named, executable task.
///
/// The `'static` bound gives every task struct a stable [`TypeId`], which
/// task selection uses to pull in declared dependencies.
pub trait Task: Send + Sync + 'static {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// The concrete `TypeId` of this task, used as a dependency identifier.
    fn task_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Tasks whose results this task reads.
    ///
    /// A filtered run always includes these, unless they were named in
    /// `--skip`.
    fn dependencies(&self) -> &[TypeId] {
        &[]
    }

    /// Whether this task applies to the current host.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails, such as when a required command
    /// exits non-zero or a download cannot be written.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The provisioning pipeline, in execution order.
#[must_use]
pub fn all_provision_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(host::DetectHostProfile),
        Box::new(repositories::ConfigureRepositories),
        Box::new(keyrings::ImportKeyrings),
        Box::new(packages::InstallPackages::new(PackageGroup::Base)),
        Box::new(packages::InstallPackages::new(PackageGroup::Tools)),
        Box::new(dotfiles::InstallDotfiles),
        Box::new(crontab::ConfigureCrontab),
        Box::new(line_endings::NormalizeLineEndings),
        Box::new(firmware::InstallFirmware),
    ]
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
