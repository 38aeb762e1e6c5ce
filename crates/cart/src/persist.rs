//! Storage contract for cart snapshots.

use thiserror::Error;

/// Errors surfaced by a [`SnapshotStore`] implementation.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The persisted slot could not be read.
    #[error("snapshot read failed: {0}")]
    Read(#[source] std::io::Error),

    /// The persisted slot could not be written (quota, permissions, ...).
    #[error("snapshot write failed: {0}")]
    Write(#[source] std::io::Error),
}

/// A single-slot byte store holding the persisted cart snapshot.
///
/// The cart core reads the slot at most once, at hydration, and replaces it
/// wholesale after every mutation. Implementations own durability and
/// atomicity; from the cart's perspective each write is a full overwrite of
/// the previous snapshot.
pub trait SnapshotStore {
    /// Read the current snapshot, or `None` when nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Read`] when the slot exists but cannot be
    /// read. The cart treats this the same as an absent snapshot.
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError>;

    /// Replace the snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Write`] when the slot cannot be written.
    /// The cart logs and swallows this; in-memory state stays authoritative.
    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError>;
}

/// In-memory [`SnapshotStore`] for tests and ephemeral carts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<Vec<u8>>,
}

impl MemoryStore {
    /// An empty slot (first-run behavior).
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// A slot pre-filled with an existing snapshot.
    #[must_use]
    pub const fn seeded(bytes: Vec<u8>) -> Self {
        Self { slot: Some(bytes) }
    }

    /// The bytes currently held in the slot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<u8>>, SnapshotError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        self.slot = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrites_slot() {
        let mut store = MemoryStore::new();
        store.save(b"first").unwrap();
        store.save(b"second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn test_seeded_store_returns_snapshot() {
        let store = MemoryStore::seeded(b"blob".to_vec());
        assert_eq!(store.snapshot(), Some(&b"blob"[..]));
    }
}
