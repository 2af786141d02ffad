//! GPG key import and apt trust-store refresh.
use std::path::Path;

use super::command::CommandSpec;

/// `gpg --keyserver <server> --recv-keys <id>`.
#[must_use]
pub fn recv_key(server: &str, id: &str) -> CommandSpec {
    CommandSpec::new(
        format!("Updating GPG KEY: {id}"),
        "gpg",
        ["--keyserver", server, "--recv-keys", id],
    )
    .settling()
}

/// `apt-key add <pubring>`.
#[must_use]
pub fn add_pubring(pubring: &Path) -> CommandSpec {
    CommandSpec::new(
        "Adding the pubring",
        "apt-key",
        ["add".to_string(), pubring.display().to_string()],
    )
}
