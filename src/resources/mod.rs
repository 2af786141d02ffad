//! Host resources: downloaded files, backups and planned system commands.
pub mod backup;
pub mod command;
pub mod crontab;
pub mod git_repo;
pub mod helpers {
    //! Shared helpers for resource implementations.
    pub mod fs;
}
pub mod keyring;
pub mod line_endings;
pub mod package;
pub mod remote_file;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use command::{CommandSpec, run_privileged_command};

/// Minimal interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to network
    /// failures, I/O failures or permission issues.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use easy_debian::resources::ResourceChange;
///
/// let created = ResourceChange::Created;
/// let replaced = ResourceChange::Replaced { backup: PathBuf::from("/root/.vimrc.bkp") };
///
/// assert_eq!(created.backup(), None);
/// assert_eq!(replaced.backup(), Some(PathBuf::from("/root/.vimrc.bkp").as_path()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Nothing existed at the target before.
    Created,
    /// The previous target was moved aside first.
    Replaced {
        /// Where the previous target now lives.
        backup: PathBuf,
    },
}

impl ResourceChange {
    /// The backup left behind, if any.
    #[must_use]
    pub fn backup(&self) -> Option<&Path> {
        match self {
            Self::Created => None,
            Self::Replaced { backup } => Some(backup),
        }
    }
}
