//! In-memory record store — useful for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use troupe_core::error::StoreError;
use troupe_core::record::{CustomerRecord, RecordStore};

/// A record store backed by a plain map. Nothing persists.
#[derive(Default)]
pub struct InMemoryStore {
    customers: RwLock<BTreeMap<String, CustomerRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get(&self, name: &str) -> Result<Option<CustomerRecord>, StoreError> {
        Ok(self.customers.read().await.get(name).cloned())
    }

    async fn put(&self, name: &str, record: CustomerRecord) -> Result<(), StoreError> {
        self.customers
            .write()
            .await
            .insert(name.to_string(), record);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<(String, CustomerRecord)>, StoreError> {
        let customers = self.customers.read().await;
        Ok(customers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use troupe_core::record::SubscriptionStatus;

    #[tokio::test]
    async fn put_get_all() {
        let store = InMemoryStore::new();
        assert!(store.get("Ann").await.unwrap().is_none());

        let record = CustomerRecord::new("2026-08-30 12:00:00");
        store.put("Ann", record.clone()).await.unwrap();

        let got = store.get("Ann").await.unwrap().unwrap();
        assert_eq!(got.status, SubscriptionStatus::Active);
        assert_eq!(store.all().await.unwrap().len(), 1);
    }
}
