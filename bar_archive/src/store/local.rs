//! Local filesystem store.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::ResultExt;

use super::{IoSnafu, ObjectStore, StoreError, WriteSnafu};

/// Stores each artifact as a file under a root directory.
///
/// Writes go to a temporary file in the same directory and are then renamed
/// over the destination, so concurrent readers see either the old artifact
/// or the new one, never a truncated mix.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Creates the store, creating the root directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).context(IoSnafu)?;
        Ok(Self { root })
    }

    fn path_for(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(location);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(IoSnafu),
        }
    }

    async fn write(&self, location: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(location);

        // Stage in the same directory so the final rename stays on one
        // filesystem and is atomic.
        let mut staged = tempfile::NamedTempFile::new_in(&self.root).context(IoSnafu)?;
        staged.write_all(bytes).context(IoSnafu)?;
        staged.flush().context(IoSnafu)?;

        staged.persist(&path).map_err(|e| {
            WriteSnafu {
                location: location.to_string(),
                message: e.to_string(),
            }
            .build()
        })?;

        Ok(())
    }
}
