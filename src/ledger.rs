//! Ledger collaborator contract and reference implementation
//!
//! The system of record is an external byte-key/byte-value store reached
//! through [`Ledger`]: a put, a get, and nothing else. No key enumeration,
//! no transactions, no compare-and-swap. The store is assumed to serialize
//! concurrent commits itself; the engine performs no locking of its own,
//! so two racing writes to one key resolve to whichever the ledger commits
//! last.
//!
//! [`MemoryLedger`] backs the tests and gives embedders a starting point.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{Result, storage_error};

/// Byte-addressed key-value store of record.
///
/// Both operations are blocking and complete or fail before returning.
/// Failures map to [`crate::Error::Storage`].
pub trait Ledger {
    /// Store a value under a key, overwriting any prior value
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Fetch the value stored under a key, `None` on a miss
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
}

/// In-memory ledger over a map behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// True when nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Ledger for MemoryLedger {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| storage_error!("ledger lock poisoned"))?;

        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| storage_error!("ledger lock poisoned"))?;

        Ok(entries.get(key).cloned())
    }
}
