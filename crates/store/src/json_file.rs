//! File-based record store — a single JSON document on disk.
//!
//! The ledger is one file of the shape `{"customers": {...}}`. It is
//! loaded whole at construction and written whole on every mutation —
//! no partial updates, no schema versioning. This gives fast reads with
//! durable writes, and the file stays human-inspectable.
//!
//! Access goes through an internal `RwLock`, which is the single-writer
//! serialization point for concurrent billing calls within one process.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use troupe_core::error::StoreError;
use troupe_core::record::{CustomerRecord, RecordStore};

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Ledger {
    #[serde(default)]
    customers: BTreeMap<String, CustomerRecord>,
}

/// A JSON-file-backed customer ledger.
pub struct JsonFileStore {
    path: PathBuf,
    ledger: RwLock<Ledger>,
}

impl JsonFileStore {
    /// Open (or start) a ledger at the given path.
    ///
    /// A missing file means an empty ledger; the file is created on the
    /// first write. A corrupted file is treated as empty with a warning
    /// rather than failing startup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ledger = Self::load_from_disk(&path);
        debug!(path = %path.display(), customers = ledger.customers.len(), "Customer ledger loaded");
        Self {
            path,
            ledger: RwLock::new(ledger),
        }
    }

    fn load_from_disk(path: &Path) -> Ledger {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Ledger::default(),
        };

        match serde_json::from_str(&content) {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Corrupted ledger file, starting empty");
                Ledger::default()
            }
        }
    }

    /// Write the whole ledger back to disk.
    async fn flush(&self) -> Result<(), StoreError> {
        let ledger = self.ledger.read().await;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create ledger directory: {e}")))?;
        }

        let content = serde_json::to_string_pretty(&*ledger)
            .map_err(|e| StoreError::Serde(e.to_string()))?;

        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::Io(format!("Failed to write ledger file: {e}")))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn get(&self, name: &str) -> Result<Option<CustomerRecord>, StoreError> {
        Ok(self.ledger.read().await.customers.get(name).cloned())
    }

    async fn put(&self, name: &str, record: CustomerRecord) -> Result<(), StoreError> {
        self.ledger
            .write()
            .await
            .customers
            .insert(name.to_string(), record);
        self.flush().await
    }

    async fn all(&self) -> Result<Vec<(String, CustomerRecord)>, StoreError> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .customers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
