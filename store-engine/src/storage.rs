//! Durable key-value blob storage
//!
//! The persistence collaborator: whole collections are serialized to JSON
//! and stored under fixed string keys, one key per entity family. Two
//! implementations are provided:
//!
//! - [`RedbStore`]: single-file redb database, one `blobs` table
//! - [`MemoryStore`]: in-process map, for tests and throwaway sessions
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: a commit is
//! persistent as soon as it returns, and copy-on-write keeps the file
//! consistent across unexpected shutdowns.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single table holding every collection blob: key = collection key,
/// value = JSON-serialized collection
const BLOBS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("blobs");

/// Collection keys, one per entity family
pub mod keys {
    pub const PRODUCTS: &str = "aurax_products";
    pub const USERS: &str = "aurax_users";
    pub const ORDERS: &str = "aurax_orders";
    pub const CHATS: &str = "aurax_chats";
    pub const SETTINGS: &str = "aurax_settings";
    pub const CURRENT_USER: &str = "aurax_current_user";
    pub const NOTIFICATIONS: &str = "aurax_notifications";
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value blob store
///
/// `persist` replaces the whole blob under a key; `load` returns it, or
/// `None` if the key was never written. Full-collection replace is the
/// write granularity by design (last write wins, see the version counter
/// on `Order` for the conflict check above this layer).
pub trait DurableStore {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    fn persist(&self, key: &str, blob: &[u8]) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Load a collection and deserialize it from JSON
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn DurableStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.load(key)? {
        Some(blob) => Ok(Some(serde_json::from_slice(&blob)?)),
        None => Ok(None),
    }
}

/// Serialize a collection to JSON and persist it
pub fn persist_collection<T: Serialize>(
    store: &dyn DurableStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let blob = serde_json::to_vec(value)?;
    store.persist(key, &blob)
}

// ============================================================================
// redb-backed store
// ============================================================================

/// Blob store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create the table up front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BLOBS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }
}

impl DurableStore for RedbStore {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(BLOBS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn persist(&self, key: &str, blob: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            table.insert(key, blob)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(BLOBS_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-process blob store
#[derive(Default)]
pub struct MemoryStore {
    blobs: parking_lot::RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.blobs.read().get(key).cloned())
    }

    fn persist(&self, key: &str, blob: &[u8]) -> StorageResult<()> {
        self.blobs.write().insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.blobs.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(store: &dyn DurableStore) {
        assert!(store.load("missing").unwrap().is_none());

        persist_collection(store, keys::ORDERS, &vec!["a", "b"]).unwrap();
        let back: Option<Vec<String>> = load_collection(store, keys::ORDERS).unwrap();
        assert_eq!(back, Some(vec!["a".to_string(), "b".to_string()]));

        // full replace, not merge
        persist_collection(store, keys::ORDERS, &vec!["c"]).unwrap();
        let back: Option<Vec<String>> = load_collection(store, keys::ORDERS).unwrap();
        assert_eq!(back, Some(vec!["c".to_string()]));

        store.remove(keys::ORDERS).unwrap();
        assert!(store.load(keys::ORDERS).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_round_trip() {
        round_trip(&MemoryStore::new());
    }

    #[test]
    fn test_redb_store_round_trip() {
        round_trip(&RedbStore::open_in_memory().unwrap());
    }

    #[test]
    fn test_redb_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aurax.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.persist(keys::SETTINGS, b"{\"vat_percentage\":5.0}").unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let blob = store.load(keys::SETTINGS).unwrap().unwrap();
        assert_eq!(blob, b"{\"vat_percentage\":5.0}");
    }
}
