//! The invoking user's crontab.
use std::path::Path;

use super::command::CommandSpec;
use crate::exec::Executor;

const CRONTAB: &str = "crontab";

/// The currently installed crontab, or `None` when there is none (or it
/// cannot be listed).
#[must_use]
pub fn current(executor: &dyn Executor) -> Option<String> {
    executor
        .run_unchecked(CRONTAB, &["-l"])
        .ok()
        .filter(|r| r.success)
        .map(|r| r.stdout)
}

/// `crontab -r`.
#[must_use]
pub fn clear() -> CommandSpec {
    CommandSpec::new("Removing the crontab configuration", CRONTAB, ["-r"])
}

/// `crontab <template>`.
#[must_use]
pub fn load(template: &Path) -> CommandSpec {
    CommandSpec::new(
        "Adding the new crontab configuration",
        CRONTAB,
        [template.display().to_string()],
    )
}
