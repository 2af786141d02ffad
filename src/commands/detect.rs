//! The `detect` command: report the host profile without changing anything.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::error::ProvisionError;
use crate::logging::Logger;
use crate::platform::HostProfile;

/// Run the detect command: print the host profile and the repository list
/// it selects.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the host
/// profile cannot be detected.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let config = &setup.config;

    log.stage("Detecting host profile");
    let profile =
        HostProfile::detect(&config.distro, &config.etc_dir).map_err(ProvisionError::from)?;
    log.info(&format!("host profile: {profile}"));

    if let Some(codename) = profile.codename() {
        let repo = config.repositories.for_codename(codename.as_str());
        log.info(&format!("repository list: {}", repo.url));
        if let Some(groups) = config.packages.for_codename(codename.as_str()) {
            log.info(&format!(
                "packages: {} base, {} tools",
                groups.base.len(),
                groups.tools.len()
            ));
        }
    }
    Ok(())
}
