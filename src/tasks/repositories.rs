//! Task: install the release's repository list.
use anyhow::Result;

use super::helpers::fetch_remote;
use super::{Context, NO_HOST_PROFILE, Task, TaskResult, task_deps};
use crate::platform::{Distro, HostProfile};

/// Download the apt sources list for the detected codename.
#[derive(Debug)]
pub struct ConfigureRepositories;

impl Task for ConfigureRepositories {
    fn name(&self) -> &'static str {
        "Configure repositories"
    }

    task_deps![super::host::DetectHostProfile];

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.distro.parse::<Distro>().ok() == Some(Distro::Debian)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(codename) = ctx.host_profile().and_then(HostProfile::codename) else {
            return Ok(TaskResult::Skipped(NO_HOST_PROFILE.to_string()));
        };
        let file = ctx.config.repositories.for_codename(codename.as_str());
        fetch_remote(ctx, &file)?;
        Ok(if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::exec::test_helpers::MockExecutor;
    use crate::fetch::MockFetch;
    use crate::tasks::test_helpers::{TestEnv, jessie, make_context, make_context_with_fetcher};
    use std::sync::Arc;

    #[test]
    fn not_applicable_on_centos() {
        let mut env = TestEnv::new();
        env.config.distro = "centos".to_string();
        let ctx = make_context(&env, Arc::new(MockExecutor::new()), false);
        assert!(!ConfigureRepositories.should_run(&ctx));
    }

    #[test]
    fn skipped_without_profile() {
        let env = TestEnv::new();
        let ctx = make_context(&env, Arc::new(MockExecutor::new()), false);
        let result = ConfigureRepositories.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(reason) if reason == NO_HOST_PROFILE));
    }

    #[test]
    fn fetches_codename_list_with_backup() {
        let env = TestEnv::new();
        let target = env.path("sources.list");
        std::fs::write(&target, "A").unwrap();

        let mut fetcher = MockFetch::new();
        fetcher
            .expect_get()
            .withf(|url| url.ends_with("/sources-jessie.list"))
            .times(1)
            .returning(|_| Ok(b"B".to_vec()));
        let (ctx, _log) =
            make_context_with_fetcher(&env, Arc::new(MockExecutor::new()), fetcher, false);
        ctx.set_host_profile(Some(jessie()));

        assert!(matches!(ConfigureRepositories.run(&ctx).unwrap(), TaskResult::Ok));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "B");
        assert_eq!(std::fs::read_to_string(env.path("sources.list.bkp")).unwrap(), "A");
    }

    #[test]
    fn failed_fetch_fails_task() {
        let env = TestEnv::new();
        let mut fetcher = MockFetch::new();
        fetcher.expect_get().returning(|url| {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        });
        let (ctx, _log) =
            make_context_with_fetcher(&env, Arc::new(MockExecutor::new()), fetcher, false);
        ctx.set_host_profile(Some(jessie()));
        assert!(ConfigureRepositories.run(&ctx).is_err());
        assert!(!env.path("sources.list").exists());
    }
}
