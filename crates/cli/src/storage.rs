//! File-backed snapshot storage.

use std::fs;
use std::io;
use std::path::PathBuf;

use lingonberry_cart::{SnapshotError, SnapshotStore};

/// A single JSON file acting as the cart's persistent slot.
///
/// A missing file reads as "no snapshot yet"; every save replaces the whole
/// file, matching the overwrite semantics the cart core expects.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Read(e)),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        fs::write(&self.path, bytes).map_err(SnapshotError::Write)
    }
}
