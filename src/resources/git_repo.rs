//! Git clone plus copy into a system directory.
use std::path::Path;

use anyhow::Result;

use super::command::CommandSpec;
use super::helpers::fs::visible_entries;

/// `git clone <url> <path>`.
#[must_use]
pub fn clone(url: &str, path: &Path, label: &str) -> CommandSpec {
    CommandSpec::new(
        format!("Cloning the {label}"),
        "git",
        [
            "clone".to_string(),
            url.to_string(),
            path.display().to_string(),
        ],
    )
}

/// Plan the copy of a clone at `source` into `target`.
///
/// An existing `target` directory receives the clone's non-hidden top-level
/// entries, merged with what is already there. Otherwise `target` (without
/// a trailing `/`) is created as a copy of the whole clone. Returns `None`
/// when an existing target would receive nothing.
///
/// # Errors
///
/// Returns an error if `source` cannot be listed.
pub fn copy_plan(source: &Path, target: &str, label: &str) -> Result<Option<CommandSpec>> {
    let report = format!("Copying the {label} to {target}");
    if Path::new(target).is_dir() {
        let entries = visible_entries(source)?;
        if entries.is_empty() {
            return Ok(None);
        }
        let args = std::iter::once("-Rfa".to_string())
            .chain(entries.iter().map(|p| p.display().to_string()))
            .chain(std::iter::once(target.to_string()));
        return Ok(Some(CommandSpec::new(report, "cp", args)));
    }

    let target = target.strip_suffix('/').unwrap_or(target);
    Ok(Some(CommandSpec::new(
        report,
        "cp",
        [
            "-Rfa".to_string(),
            source.display().to_string(),
            target.to_string(),
        ],
    )))
}
