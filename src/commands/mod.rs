//! Top-level subcommand orchestration.
pub mod detect;
pub mod provision;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::{ConfigError, ProvisionError};
use crate::exec::Executor;
use crate::fetch::HttpFetcher;
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Resolves `$HOME`, loads the configuration and applies the command-line
/// overrides so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded configuration with overrides applied.
    pub config: Config,
}

impl CommandSetup {
    /// Load the configuration and apply `--distro` and `--proxy`.
    ///
    /// # Errors
    ///
    /// Returns an error if `$HOME` is unset or the configuration file cannot
    /// be read or parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self, ProvisionError> {
        let home = home_dir()?;

        log.stage("Loading configuration");
        let mut config = Config::load(global.config.as_deref(), &home)?;
        apply_overrides(&mut config, global);

        match &global.config {
            Some(path) => log.info(&format!("configuration: {}", path.display())),
            None => log.info("configuration: built-in defaults"),
        }
        log.debug(&format!("distro hint: {}", config.distro));
        log.debug(&format!("{} keys", config.keyring.keys.len()));
        log.debug(&format!("{} dotfiles", config.dotfiles.len()));
        log.debug(&format!("{} files to normalize", config.normalize.len()));
        if let Some(proxy) = &config.proxy {
            log.debug(&format!("proxy: {proxy}"));
        }

        Ok(Self { config })
    }

    /// Build the task context, creating the HTTP client for the configured
    /// proxy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] if the proxy URL is rejected.
    pub fn into_context(
        self,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        dry_run: bool,
    ) -> Result<Context, ProvisionError> {
        let fetcher = HttpFetcher::new(self.config.proxy.as_deref())?;
        Ok(Context::new(
            Arc::new(self.config),
            log,
            executor,
            Arc::new(fetcher),
            dry_run,
        ))
    }
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingHome)
}

fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(distro) = &global.distro {
        config.distro.clone_from(distro);
    }
    if let Some(proxy) = &global.proxy {
        config.proxy = Some(proxy.clone());
    }
}

/// Execute every task in order and print the summary.
///
/// Failed tasks are reported in the summary; with `strict` they also make
/// the command fail.
///
/// # Errors
///
/// Returns an error if `strict` is set and one or more tasks failed.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
    strict: bool,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if strict && count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::fetch::MockFetch;
    use crate::tasks::test_helpers::{TestEnv, make_context_with_fetcher};
    use crate::tasks::{TaskResult, host::DetectHostProfile};

    #[test]
    fn overrides_replace_config_values() {
        let mut config = Config::default();
        let global = GlobalOpts {
            distro: Some("centos".to_string()),
            proxy: Some("http://10.0.0.254:3128".to_string()),
            ..GlobalOpts::default()
        };
        apply_overrides(&mut config, &global);
        assert_eq!(config.distro, "centos");
        assert_eq!(config.proxy.as_deref(), Some("http://10.0.0.254:3128"));
    }

    #[test]
    fn no_overrides_keep_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &GlobalOpts::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_proxy_is_a_config_error() {
        let config = Config {
            proxy: Some("not a url".to_string()),
            ..Config::default()
        };
        let log: Arc<dyn Log> = Arc::new(Logger::with_log_file(None, false));
        let err = CommandSetup { config }
            .into_context(log, Arc::new(MockExecutor::new()), false)
            .unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::Config(ConfigError::InvalidProxy { .. })
        ));
    }

    struct Failing;

    impl Task for Failing {
        fn name(&self) -> &'static str {
            "Failing"
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            true
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            anyhow::bail!("boom")
        }
    }

    #[test]
    fn failures_only_fail_the_run_when_strict() {
        let env = TestEnv::new();
        let (ctx, log) =
            make_context_with_fetcher(&env, Arc::new(MockExecutor::new()), MockFetch::new(), false);
        let tasks: [&dyn Task; 2] = [&Failing, &DetectHostProfile];

        run_tasks_to_completion(tasks, &ctx, &log, false).unwrap();
        assert_eq!(log.failure_count(), 2);
        let err = run_tasks_to_completion(tasks, &ctx, &log, true).unwrap_err();
        assert_eq!(err.to_string(), "4 task(s) failed");
    }
}
