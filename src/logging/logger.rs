//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::{log_file_path, paint};

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages go through [`tracing`]; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) decides where they
/// land. The logger itself only keeps the task results and the log file
/// path shown in the summary.
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
    color: bool,
}

impl Logger {
    /// Create a logger for `command`, pointing the summary at
    /// `$XDG_CACHE_HOME/easy-debian/<command>.log`.
    #[must_use]
    pub fn new(command: &str, color: bool) -> Self {
        Self::with_log_file(log_file_path(command), color)
    }

    /// Create a logger reporting an explicit log file path.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>, color: bool) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file,
            color,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded task entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a task result for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed tasks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded tasks.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut not_applicable = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for task in &tasks {
            let (icon, code) = match task.status {
                TaskStatus::Ok => {
                    ok += 1;
                    ("✓", "32")
                }
                TaskStatus::NotApplicable => {
                    not_applicable += 1;
                    ("·", "2")
                }
                TaskStatus::Skipped => {
                    skipped += 1;
                    ("○", "33")
                }
                TaskStatus::DryRun => {
                    dry_run += 1;
                    ("~", "37")
                }
                TaskStatus::Failed => {
                    failed += 1;
                    ("✗", "31")
                }
            };

            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&paint(
                self.color,
                code,
                &format!("{icon} {}{suffix}", task.name),
            ));
        }

        let total = ok + not_applicable + skipped + dry_run + failed;
        let c = self.color;
        self.info(&format!(
            "{total} tasks: {}, {}, {}, {}, {}",
            paint(c, "32", &format!("{ok} ok")),
            paint(c, "2", &format!("{not_applicable} n/a")),
            paint(c, "33", &format!("{skipped} skipped")),
            paint(c, "37", &format!("{dry_run} dry-run")),
            paint(c, "31", &format!("{failed} failed")),
        ));

        if let Some(path) = &self.log_file {
            self.info(&paint(c, "2", &format!("log: {}", path.display())));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.record_task(name, status, message);
    }
}
