//! CRLF to LF conversion.
use std::path::Path;

use super::command::CommandSpec;

/// `dos2unix -q <path>`.
#[must_use]
pub fn dos2unix(path: &Path) -> CommandSpec {
    CommandSpec::new(
        format!("Converting the file: {}", path.display()),
        "dos2unix",
        ["-q".to_string(), path.display().to_string()],
    )
}
