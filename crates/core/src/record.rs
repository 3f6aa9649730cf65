//! Customer record types and the RecordStore trait.
//!
//! The billing tools read and mutate a flat ledger keyed by customer
//! name. The store is injected as a capability so the billing path can
//! be tested against an in-memory fake; the production backend is a
//! whole-file JSON store. Timestamps are stored pre-formatted
//! (`%Y-%m-%d %H:%M:%S`) because they are only ever displayed, never
//! computed with.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Subscription state of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "active"),
            SubscriptionStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A single recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub payment_id: String,
    pub timestamp: String,
}

/// The persisted record for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment: Option<String>,
}

impl CustomerRecord {
    /// A fresh record for a customer seen for the first time.
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            status: SubscriptionStatus::Active,
            payments: Vec::new(),
            created_at: created_at.into(),
            last_payment: None,
        }
    }
}

/// The record store capability: `get`, `put`, and enumeration.
///
/// Implementations load the ledger whole and write it whole — no partial
/// updates, no schema versioning.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one customer record by name.
    async fn get(&self, name: &str) -> std::result::Result<Option<CustomerRecord>, StoreError>;

    /// Insert or replace one customer record.
    async fn put(&self, name: &str, record: CustomerRecord)
    -> std::result::Result<(), StoreError>;

    /// All records, ordered by customer name.
    async fn all(&self) -> std::result::Result<Vec<(String, CustomerRecord)>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization_roundtrip() {
        let record = CustomerRecord {
            status: SubscriptionStatus::Active,
            payments: vec![Payment {
                amount: 1.0,
                payment_id: "PAY_20260830120000".into(),
                timestamp: "2026-08-30 12:00:00".into(),
            }],
            created_at: "2026-08-30 12:00:00".into(),
            last_payment: Some("2026-08-30 12:00:00".into()),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: CustomerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        assert_eq!(SubscriptionStatus::Inactive.to_string(), "inactive");
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: CustomerRecord = serde_json::from_str(
            r#"{"status":"inactive","created_at":"2026-01-01 00:00:00"}"#,
        )
        .unwrap();
        assert!(record.payments.is_empty());
        assert!(record.last_payment.is_none());
    }
}
