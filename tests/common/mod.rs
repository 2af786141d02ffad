// Shared helpers for integration tests.
//
// Provides a temporary host layout (an `etc/` directory plus every write
// target) described by a TOML configuration file, and a recording executor
// so the pipeline can run without touching the real system.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use easy_debian::config::Config;
use easy_debian::exec::{ExecResult, Executor};
use easy_debian::fetch::HttpFetcher;
use easy_debian::logging::{Log, Logger};
use easy_debian::tasks::Context;

/// Write a configuration file that keeps every path inside `root` and points
/// every template at `base_url`.
pub fn write_config(root: &Path, base_url: &str, extra: &str) -> PathBuf {
    let etc = root.join("etc");
    std::fs::create_dir_all(&etc).expect("create etc dir");
    let content = format!(
        r#"settle_secs = 0
etc_dir = "{etc}"
normalize = ["~/.vimrc"]
{extra}

[keyring]
pubring = "~/.gnupg/pubring.gpg"

[repositories]
url = "{base_url}/sources-{{codename}}.list"
path = "~/sources.list"

[[dotfiles]]
url = "{base_url}/vimrc"
path = "~/.vimrc"

[crontab]
url = "{base_url}/crontab"
path = "~/crontab"
backup = "~/crontab.bkp"

[firmware]
url = "{base_url}/firmware.git"
path = "~/src/firmware"
copy_to = "~/lib/firmware/"
"#,
        etc = etc.display(),
    );
    let path = root.join("easy-debian.toml");
    std::fs::write(&path, content).expect("write config file");
    path
}

/// An isolated host layout backed by a [`tempfile::TempDir`].
#[derive(Debug)]
pub struct IntegrationTestContext {
    /// Temporary directory standing in for `$HOME` and `/etc`.
    pub root: tempfile::TempDir,
    /// Configuration loaded from the written TOML file.
    pub config: Config,
}

impl IntegrationTestContext {
    /// Layout whose templates are served from `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_extra(base_url, "")
    }

    /// Like [`new`](Self::new) with extra top-level TOML lines.
    pub fn with_extra(base_url: &str, extra: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let path = write_config(root.path(), base_url, extra);
        let config = Config::load(Some(&path), root.path()).expect("load config");
        Self { root, config }
    }

    /// Path inside the layout.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write `<etc>/debian_version`.
    pub fn with_debian_version(self, contents: &str) -> Self {
        std::fs::write(self.path("etc/debian_version"), contents).expect("write debian_version");
        self
    }

    /// Build a task context around `executor` and a real HTTP fetcher.
    pub fn context(
        &self,
        executor: Arc<dyn Executor>,
        dry_run: bool,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::with_log_file(None, false));
        let fetcher = HttpFetcher::new(self.config.proxy.as_deref()).expect("build fetcher");
        let ctx = Context::new(
            Arc::new(self.config.clone()),
            Arc::clone(&log) as Arc<dyn Log>,
            executor,
            Arc::new(fetcher),
            dry_run,
        );
        (ctx, log)
    }
}

/// Executor that records every invocation and never spawns a process.
///
/// Commands succeed with empty output unless a rule matches the start of the
/// command line; later rules win.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    rules: Vec<(String, bool, String)>,
    lines: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Executor where every command succeeds silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make command lines starting with `prefix` exit non-zero.
    pub fn failing(mut self, prefix: &str) -> Self {
        self.rules.push((prefix.to_string(), false, String::new()));
        self
    }

    /// Make command lines starting with `prefix` print `stdout`.
    pub fn with_output(mut self, prefix: &str, stdout: &str) -> Self {
        self.rules.push((prefix.to_string(), true, stdout.to_string()));
        self
    }

    /// Every recorded command line.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock lines").clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> ExecResult {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let (success, stdout) = self
            .rules
            .iter()
            .rev()
            .find(|(prefix, _, _)| line.starts_with(prefix.as_str()))
            .map_or((true, String::new()), |(_, ok, out)| (*ok, out.clone()));
        self.lines.lock().expect("lock lines").push(line);
        ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        }
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let result = self.record(program, args);
        if !result.success {
            anyhow::bail!("{program} failed");
        }
        Ok(result)
    }

    fn run_unchecked_with_env(
        &self,
        program: &str,
        args: &[&str],
        _env: &[(&str, &str)],
    ) -> anyhow::Result<ExecResult> {
        Ok(self.record(program, args))
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}
