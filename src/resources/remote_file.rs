//! Remote template downloaded over HTTP into a local path.
use anyhow::Result;

use super::backup::write_with_backup;
use super::{Applicable, ResourceChange};
use crate::config::RemoteFile;
use crate::fetch::Fetch;

/// A [`RemoteFile`] bound to the fetcher that retrieves it.
///
/// Applying downloads first and only touches the local path once a body
/// was received, so a failed download leaves any existing file untouched.
pub struct RemoteFileResource<'a> {
    file: &'a RemoteFile,
    fetcher: &'a dyn Fetch,
}

impl std::fmt::Debug for RemoteFileResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFileResource")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

impl<'a> RemoteFileResource<'a> {
    /// Create a new remote file resource.
    #[must_use]
    pub const fn new(file: &'a RemoteFile, fetcher: &'a dyn Fetch) -> Self {
        Self { file, fetcher }
    }
}

impl Applicable for RemoteFileResource<'_> {
    fn description(&self) -> String {
        format!("{} → {}", self.file.url, self.file.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let body = self.fetcher.get(&self.file.url)?;
        Ok(match write_with_backup(&self.file.path, &body)? {
            Some(backup) => ResourceChange::Replaced { backup },
            None => ResourceChange::Created,
        })
    }
}
