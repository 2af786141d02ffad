//! The `provision` command: run the pipeline.
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::{GlobalOpts, ProvisionOpts};
use crate::error::ProvisionError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform;
use crate::tasks::{self, Task};

/// Run the provision command.
///
/// # Errors
///
/// Returns an error if the process is not root (outside dry-run mode), the
/// configuration cannot be loaded, or `--strict` is set and a task failed.
pub fn run(global: &GlobalOpts, opts: &ProvisionOpts, log: &Arc<Logger>) -> Result<()> {
    let version = option_env!("EASY_DEBIAN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("easy-debian {version} (pid {})", std::process::id()));

    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    if let Err(e) = platform::ensure_root(executor.as_ref()) {
        if !global.dry_run {
            return Err(ProvisionError::from(e).into());
        }
        log.warn(&format!("{e} (continuing in dry-run mode)"));
    }

    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(Arc::clone(log) as Arc<dyn Log>, executor, global.dry_run)?;

    let all_tasks = tasks::all_provision_tasks();
    let selected = select_tasks(&all_tasks, opts);
    run_tasks_to_completion(selected, &ctx, log, opts.strict)?;

    if !global.dry_run {
        log.info("Now you need to restart the machine to reload all the new configurations!");
    }
    Ok(())
}

/// Filter tasks by `--only` (takes precedence) or `--skip`, matching
/// case-insensitive substrings of task names.
///
/// Declared dependencies of a selected task are added back unless `--skip`
/// names them. Pipeline order is preserved.
#[must_use]
pub fn select_tasks<'a>(all: &'a [Box<dyn Task>], opts: &ProvisionOpts) -> Vec<&'a dyn Task> {
    let filtering_only = !opts.only.is_empty();
    let mut selected: HashSet<TypeId> = all
        .iter()
        .filter(|t| {
            if filtering_only {
                name_matches(t.name(), &opts.only)
            } else {
                !name_matches(t.name(), &opts.skip)
            }
        })
        .map(|t| t.task_id())
        .collect();

    let mut pending: Vec<TypeId> = selected.iter().copied().collect();
    while let Some(id) = pending.pop() {
        let Some(task) = all.iter().find(|t| t.task_id() == id) else {
            continue;
        };
        for dep in task.dependencies() {
            let Some(dep_task) = all.iter().find(|t| t.task_id() == *dep) else {
                continue;
            };
            let skipped = !filtering_only && name_matches(dep_task.name(), &opts.skip);
            if !skipped && selected.insert(*dep) {
                pending.push(*dep);
            }
        }
    }

    all.iter()
        .filter(|t| selected.contains(&t.task_id()))
        .map(AsRef::as_ref)
        .collect()
}

fn name_matches(name: &str, patterns: &[String]) -> bool {
    let name = name.to_lowercase();
    patterns.iter().any(|p| name.contains(&p.to_lowercase()))
}
