//! Planned external commands and the success/failure reporting around them.
use std::fmt;

use crate::exec::Executor;
use crate::logging::Log;

/// Environment that keeps apt front-ends from prompting.
pub const NONINTERACTIVE: (&str, &str) = ("DEBIAN_FRONTEND", "noninteractive");

/// One external program invocation, described before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Text used in the success/failure report.
    pub label: String,
    /// Executable name, resolved through `PATH`.
    pub program: &'static str,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Extra environment variables for the child.
    pub env: Vec<(&'static str, &'static str)>,
    /// Pause afterwards so daemons reacting to the change can catch up.
    pub settle: bool,
}

impl CommandSpec {
    /// Describe `program args…`, reported as `label`.
    #[must_use]
    pub fn new<I, S>(label: impl Into<String>, program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            program,
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
            settle: false,
        }
    }

    /// Add an environment variable for the child.
    #[must_use]
    pub fn with_env(mut self, var: (&'static str, &'static str)) -> Self {
        self.env.push(var);
        self
    }

    /// Mark the command as needing a settle pause afterwards.
    #[must_use]
    pub const fn settling(mut self) -> Self {
        self.settle = true;
        self
    }

    /// Arguments as borrowed strings.
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.env {
            write!(f, "{k}={v} ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Run `spec` and report the outcome.
///
/// Returns `true` when the program ran and exited zero. Spawn failures and
/// non-zero exits are logged as errors and return `false`.
pub fn run_privileged_command(executor: &dyn Executor, log: &dyn Log, spec: &CommandSpec) -> bool {
    log.debug(&format!("running: {spec}"));
    let ok = match executor.run_unchecked_with_env(spec.program, &spec.arg_refs(), &spec.env) {
        Ok(result) if result.success => true,
        Ok(result) => {
            let stderr = result.stderr.trim();
            if !stderr.is_empty() {
                log.debug(&format!("{}: {stderr}", spec.program));
            }
            false
        }
        Err(e) => {
            log.debug(&format!("{e:#}"));
            false
        }
    };
    if ok {
        log.info(&format!("{} executed successfully", spec.label));
    } else {
        log.error(&format!("{} executed with errors", spec.label));
    }
    ok
}
