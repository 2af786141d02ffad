//! Package-manager invocations (aptitude).
use super::command::{CommandSpec, NONINTERACTIVE};

const APTITUDE: &str = "aptitude";

/// `aptitude update`.
#[must_use]
pub fn update() -> CommandSpec {
    CommandSpec::new("Updating repositories", APTITUDE, ["update"]).settling()
}

/// `aptitude safe-upgrade -y`, non-interactive.
#[must_use]
pub fn safe_upgrade() -> CommandSpec {
    CommandSpec::new("Updating the system", APTITUDE, ["safe-upgrade", "-y"])
        .with_env(NONINTERACTIVE)
        .settling()
}

/// `aptitude install -y <names…>`, non-interactive, reported as `label`.
#[must_use]
pub fn install(names: &[String], label: &str) -> CommandSpec {
    let args = ["install", "-y"]
        .into_iter()
        .map(String::from)
        .chain(names.iter().cloned());
    CommandSpec::new(format!("Installing packages: {label}"), APTITUDE, args)
        .with_env(NONINTERACTIVE)
        .settling()
}
