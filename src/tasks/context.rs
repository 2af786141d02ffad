//! Shared state handed to every task.
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::config::Config;
use crate::exec::Executor;
use crate::fetch::Fetch;
use crate::logging::Log;
use crate::platform::{self, HostProfile};
use crate::resources::{CommandSpec, run_privileged_command};

/// Shared context for task execution.
pub struct Context {
    /// Provisioning settings.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Template downloader.
    pub fetcher: Arc<dyn Fetch>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Pause after package-manager calls and key imports.
    pub settle: Duration,
    /// Set once by host detection; `None` records a failed detection.
    host: OnceLock<Option<HostProfile>>,
    kernel: OnceLock<Option<String>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("fetcher", &"<dyn Fetch>")
            .field("dry_run", &self.dry_run)
            .field("settle", &self.settle)
            .field("host", &self.host.get())
            .field("kernel", &self.kernel.get())
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        fetcher: Arc<dyn Fetch>,
        dry_run: bool,
    ) -> Self {
        let settle = Duration::from_secs(config.settle_secs);
        Self {
            config,
            log,
            executor,
            fetcher,
            dry_run,
            settle,
            host: OnceLock::new(),
            kernel: OnceLock::new(),
        }
    }

    /// Record the outcome of host detection. Later calls are ignored.
    pub fn set_host_profile(&self, profile: Option<HostProfile>) {
        if self.host.set(profile).is_err() {
            self.log.debug("host profile already recorded");
        }
    }

    /// The detected host profile, if detection ran and succeeded.
    #[must_use]
    pub fn host_profile(&self) -> Option<&HostProfile> {
        self.host.get().and_then(Option::as_ref)
    }

    /// Release of the running kernel, queried once.
    #[must_use]
    pub fn kernel_release(&self) -> Option<&str> {
        self.kernel
            .get_or_init(|| platform::kernel_release(self.executor.as_ref()))
            .as_deref()
    }

    /// Run a planned command, or describe it in dry-run mode.
    ///
    /// Returns whether the command succeeded; always `true` in dry-run mode.
    pub fn run_command(&self, spec: &CommandSpec) -> bool {
        if self.dry_run {
            self.log.dry_run(&format!("would run: {spec}"));
            return true;
        }
        let ok = run_privileged_command(self.executor.as_ref(), self.log.as_ref(), spec);
        if spec.settle {
            self.pause();
        }
        ok
    }

    /// Sleep for the configured settle delay.
    pub fn pause(&self) {
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::platform::Distro;
    use crate::resources::package;
    use crate::tasks::test_helpers::{TestEnv, make_context};

    #[test]
    fn host_profile_is_set_once() {
        let env = TestEnv::new();
        let ctx = make_context(&env, Arc::new(MockExecutor::new()), false);
        assert!(ctx.host_profile().is_none());
        let profile = HostProfile {
            distro: Distro::Debian,
            version_code: "jessie".to_string(),
        };
        ctx.set_host_profile(Some(profile.clone()));
        ctx.set_host_profile(None);
        assert_eq!(ctx.host_profile(), Some(&profile));
    }

    #[test]
    fn kernel_release_is_queried_once() {
        let env = TestEnv::new();
        let executor = Arc::new(MockExecutor::new().with_output("uname -r", "3.16.0-4-amd64\n"));
        let ctx = make_context(&env, executor.clone(), false);
        assert_eq!(ctx.kernel_release(), Some("3.16.0-4-amd64"));
        assert_eq!(ctx.kernel_release(), Some("3.16.0-4-amd64"));
        assert_eq!(executor.lines(), vec!["uname -r"]);
    }

    #[test]
    fn dry_run_does_not_execute() {
        let env = TestEnv::new();
        let executor = Arc::new(MockExecutor::new());
        let ctx = make_context(&env, executor.clone(), true);
        assert!(ctx.run_command(&package::update()));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn run_command_reports_failure() {
        let env = TestEnv::new();
        let executor = Arc::new(MockExecutor::new().failing("aptitude"));
        let ctx = make_context(&env, executor.clone(), false);
        assert!(!ctx.run_command(&package::update()));
        assert_eq!(executor.lines(), vec!["aptitude update"]);
    }
}
