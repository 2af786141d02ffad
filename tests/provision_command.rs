#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `provision` command.
//!
//! These tests exercise the full task list produced by
//! [`all_provision_tasks`](easy_debian::tasks::all_provision_tasks), the
//! name-based filtering applied by `--skip` and `--only`, and a dry run of the
//! whole pipeline against a temporary host layout.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use easy_debian::cli::ProvisionOpts;
use easy_debian::commands::provision::select_tasks;
use easy_debian::commands::run_tasks_to_completion;
use easy_debian::logging::TaskStatus;
use easy_debian::tasks;

use common::{IntegrationTestContext, RecordingExecutor};

// ---------------------------------------------------------------------------
// Snapshot: full task list
// ---------------------------------------------------------------------------

#[test]
fn provision_task_names() {
    let all_tasks = tasks::all_provision_tasks();
    let task_names: Vec<&str> = all_tasks.iter().map(|t| t.name()).collect();
    insta::assert_snapshot!(task_names.join("\n"), @r"
    Detect host profile
    Configure repositories
    Import keyrings
    Install base packages
    Install tool packages
    Install dotfiles
    Configure crontab
    Normalize line endings
    Install firmware
    ");
}

// ---------------------------------------------------------------------------
// Structural invariants
// ---------------------------------------------------------------------------

#[test]
fn task_names_are_unique() {
    let all_tasks = tasks::all_provision_tasks();
    let names: HashSet<&str> = all_tasks.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), all_tasks.len());
}

#[test]
fn detection_runs_first() {
    let all_tasks = tasks::all_provision_tasks();
    assert_eq!(all_tasks[0].name(), "Detect host profile");
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[test]
fn only_selects_both_package_groups_and_detection() {
    let all_tasks = tasks::all_provision_tasks();
    let opts = ProvisionOpts {
        only: vec!["packages".to_string()],
        ..ProvisionOpts::default()
    };
    let names: Vec<&str> = select_tasks(&all_tasks, &opts)
        .iter()
        .map(|t| t.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "Detect host profile",
            "Install base packages",
            "Install tool packages",
        ]
    );
}

#[test]
fn only_packages_installs_on_a_supported_host() {
    let host = IntegrationTestContext::new("http://127.0.0.1:9").with_debian_version("8.1\n");
    let executor = Arc::new(RecordingExecutor::new().with_output("uname -r", "3.16.0-4-amd64\n"));
    let (ctx, log) = host.context(executor.clone(), false);

    let all_tasks = tasks::all_provision_tasks();
    let opts = ProvisionOpts {
        only: vec!["packages".to_string()],
        ..ProvisionOpts::default()
    };
    run_tasks_to_completion(select_tasks(&all_tasks, &opts), &ctx, &log, true).unwrap();

    let statuses: Vec<TaskStatus> = log.task_entries().iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![TaskStatus::Ok; 3]);
    let lines = executor.lines();
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("aptitude install -y")).count(),
        2
    );
    assert!(lines.iter().any(|l| l.contains("linux-headers-3.16.0-4-amd64")));
}

#[test]
fn skip_unknown_name_keeps_everything() {
    let all_tasks = tasks::all_provision_tasks();
    let opts = ProvisionOpts {
        skip: vec!["nonexistent".to_string()],
        ..ProvisionOpts::default()
    };
    assert_eq!(select_tasks(&all_tasks, &opts).len(), all_tasks.len());
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_only_queries_the_host() {
    let host = IntegrationTestContext::new("http://127.0.0.1:9").with_debian_version("8.1\n");
    let executor = Arc::new(
        RecordingExecutor::new()
            .with_output("uname -r", "3.16.0-4-amd64\n")
            .failing("crontab -l"),
    );
    let (ctx, log) = host.context(executor.clone(), true);

    let all_tasks = tasks::all_provision_tasks();
    let selected = select_tasks(&all_tasks, &ProvisionOpts::default());
    run_tasks_to_completion(selected, &ctx, &log, true).unwrap();

    assert_eq!(executor.lines(), vec!["uname -r", "crontab -l"]);
    let entries = log.task_entries();
    assert_eq!(entries.len(), all_tasks.len());
    assert_eq!(entries[0].status, TaskStatus::Ok);
    assert!(entries[1..].iter().all(|e| e.status == TaskStatus::DryRun));
    assert!(!host.path("sources.list").exists());
    assert!(!host.path(".vimrc").exists());
}

#[test]
fn failed_detection_skips_release_specific_tasks() {
    let host = IntegrationTestContext::new("http://127.0.0.1:9").with_debian_version("9.4\n");
    let executor = Arc::new(RecordingExecutor::new().failing("crontab -l"));
    let (ctx, log) = host.context(executor, true);

    let all_tasks = tasks::all_provision_tasks();
    let selected = select_tasks(&all_tasks, &ProvisionOpts::default());
    run_tasks_to_completion(selected, &ctx, &log, false).unwrap();

    let statuses: Vec<TaskStatus> = log.task_entries().iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::Failed,
            TaskStatus::Skipped,
            TaskStatus::DryRun,
            TaskStatus::Skipped,
            TaskStatus::Skipped,
            TaskStatus::DryRun,
            TaskStatus::DryRun,
            TaskStatus::DryRun,
            TaskStatus::DryRun,
        ]
    );
}

#[test]
fn centos_hosts_skip_apt_tasks() {
    let host = IntegrationTestContext::with_extra("http://127.0.0.1:9", "distro = \"centos\"");
    std::fs::write(host.path("etc/redhat-release"), "CentOS release 6.5 (Final)\n").unwrap();
    let executor = Arc::new(RecordingExecutor::new().failing("crontab -l"));
    let (ctx, log) = host.context(executor, true);

    let all_tasks = tasks::all_provision_tasks();
    let selected = select_tasks(&all_tasks, &ProvisionOpts::default());
    run_tasks_to_completion(selected, &ctx, &log, true).unwrap();

    let entries = log.task_entries();
    assert_eq!(entries[0].status, TaskStatus::Ok);
    let not_applicable: Vec<&str> = entries
        .iter()
        .filter(|e| e.status == TaskStatus::NotApplicable)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(
        not_applicable,
        vec![
            "Configure repositories",
            "Import keyrings",
            "Install base packages",
            "Install tool packages",
        ]
    );
}
