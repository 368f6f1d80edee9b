//! Path-keyed memo of loaded datasets.
//!
//! The source file is static for the life of a session, so a dataset is read
//! at most once per path and then handed out as a shared immutable snapshot.
//! There is no invalidation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use trendboard_core::Record;

use crate::error::LoadError;
use crate::loader::load_records_file;

#[derive(Debug)]
pub struct DatasetCache {
    delimiter: u8,
    entries: HashMap<PathBuf, Arc<[Record]>>,
}

impl DatasetCache {
    #[must_use]
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            entries: HashMap::new(),
        }
    }

    /// Return the records for `path`, reading the file on first use only.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the first read of `path` fails. Failed loads
    /// are not cached, so a later call retries the read.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<[Record]>, LoadError> {
        if let Some(records) = self.entries.get(path) {
            tracing::debug!(path = %path.display(), "dataset cache hit");
            return Ok(Arc::clone(records));
        }

        let records: Arc<[Record]> = load_records_file(path, self.delimiter)?.into();
        self.entries
            .insert(path.to_path_buf(), Arc::clone(&records));
        Ok(records)
    }

    /// Number of distinct datasets currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(b',')
    }
}
