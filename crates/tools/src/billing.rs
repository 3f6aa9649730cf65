//! Billing tools — payments and subscription state over the record store.
//!
//! All three tools go through the injected [`RecordStore`] capability.
//! Business rejections (wrong amount, unknown customer) are returned as
//! strings so the model can explain them to the user; only store-level
//! failures surface as tool errors.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;
use troupe_core::error::ToolError;
use troupe_core::record::{CustomerRecord, Payment, RecordStore, SubscriptionStatus};
use troupe_core::tool::Tool;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn store_failure(tool_name: &str, e: troupe_core::error::StoreError) -> ToolError {
    ToolError::ExecutionFailed {
        tool_name: tool_name.into(),
        reason: e.to_string(),
    }
}

/// Pull an amount out of the input, tolerating models that quote numbers.
fn amount_arg(input: &Map<String, Value>) -> Option<f64> {
    match input.get("amount")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').parse().ok(),
        _ => None,
    }
}

/// Records a $1/month subscription payment. Creates the customer record
/// on first payment — there is no separate registration step.
pub struct ProcessPaymentTool {
    store: Arc<dyn RecordStore>,
}

impl ProcessPaymentTool {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ProcessPaymentTool {
    fn name(&self) -> &str {
        "process_payment"
    }

    fn description(&self) -> &str {
        "Processes monthly payment and updates the customer ledger. Input: {\"amount\": 1.0, \"customer_name\": \"Full Name\"}. The subscription is $1/month. Returns payment confirmation with details."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let amount = amount_arg(&input)
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'amount' argument".into()))?;
        let customer_name = input
            .get("customer_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolError::InvalidArguments("Missing 'customer_name' argument".into())
            })?;

        if amount != 1.0 {
            return Ok(format!(
                "Invalid amount. Subscription is $1/month (received: ${amount})"
            ));
        }

        let now = Local::now();
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let payment_id = format!("PAY_{}", now.format("%Y%m%d%H%M%S"));

        let mut record = self
            .store
            .get(customer_name)
            .await
            .map_err(|e| store_failure(self.name(), e))?
            .unwrap_or_else(|| CustomerRecord::new(timestamp.clone()));

        record.payments.push(Payment {
            amount,
            payment_id: payment_id.clone(),
            timestamp: timestamp.clone(),
        });
        record.status = SubscriptionStatus::Active;
        record.last_payment = Some(timestamp);

        self.store
            .put(customer_name, record)
            .await
            .map_err(|e| store_failure(self.name(), e))?;

        info!(customer = customer_name, %payment_id, "Payment processed");
        Ok(format!(
            "Payment processed for {customer_name}!\n- Amount: ${amount}\n- Payment ID: {payment_id}\n- Status: Active"
        ))
    }
}

/// Reports the subscription state of one customer.
pub struct CheckSubscriptionTool {
    store: Arc<dyn RecordStore>,
}

impl CheckSubscriptionTool {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CheckSubscriptionTool {
    fn name(&self) -> &str {
        "check_subscription_status"
    }

    fn description(&self) -> &str {
        "Checks real subscription status from the customer ledger. Input: {\"customer_name\": \"Full Name\"}. Returns subscription status details."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let customer_name = input
            .get("customer_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolError::InvalidArguments("Missing 'customer_name' argument".into())
            })?;

        let Some(record) = self
            .store
            .get(customer_name)
            .await
            .map_err(|e| store_failure(self.name(), e))?
        else {
            return Ok(format!(
                "Customer '{customer_name}' not found in system.\nPlease process payment first to activate subscription."
            ));
        };

        let payment_count = record.payments.len();
        let last_payment = record.last_payment.as_deref().unwrap_or("Never");

        Ok(match record.status {
            SubscriptionStatus::Active => format!(
                "{customer_name}: Active subscription\n- Plan: $1/month\n- Total payments: {payment_count}\n- Last payment: {last_payment}"
            ),
            SubscriptionStatus::Inactive => format!(
                "{customer_name}: Inactive subscription\n- Total payments: {payment_count}\n- Status: Payment required"
            ),
        })
    }
}

/// Lists every customer in the ledger with their status.
pub struct ListCustomersTool {
    store: Arc<dyn RecordStore>,
}

impl ListCustomersTool {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListCustomersTool {
    fn name(&self) -> &str {
        "list_all_customers"
    }

    fn description(&self) -> &str {
        "Lists all customers in the ledger with their status. Input: {}. Returns every customer and their subscription status."
    }

    async fn invoke(&self, _input: Map<String, Value>) -> Result<String, ToolError> {
        let customers = self
            .store
            .all()
            .await
            .map_err(|e| store_failure(self.name(), e))?;

        if customers.is_empty() {
            return Ok("No customers found in the system.".into());
        }

        let mut result = format!("Total Customers: {}\n\n", customers.len());
        for (name, record) in &customers {
            let last_payment = record.last_payment.as_deref().unwrap_or("Never");
            result.push_str(&format!(
                "{name}\n   Status: {}\n   Payments: {}\n   Last Payment: {last_payment}\n\n",
                record.status,
                record.payments.len()
            ));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use troupe_store::InMemoryStore;

    fn args(json: Value) -> Map<String, Value> {
        json.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn payment_of_one_dollar_creates_record() {
        let store = Arc::new(InMemoryStore::new());
        let tool = ProcessPaymentTool::new(store.clone());

        let out = tool
            .invoke(args(
                serde_json::json!({"amount": 1.0, "customer_name": "Ann"}),
            ))
            .await
            .unwrap();

        assert!(out.starts_with("Payment processed for Ann!"));
        assert!(out.contains("Payment ID: PAY_"));

        let record = store.get("Ann").await.unwrap().unwrap();
        assert_eq!(record.status, SubscriptionStatus::Active);
        assert_eq!(record.payments.len(), 1);
        assert!(record.last_payment.is_some());
    }

    #[tokio::test]
    async fn wrong_amount_is_rejected_and_store_untouched() {
        let store = Arc::new(InMemoryStore::new());
        let tool = ProcessPaymentTool::new(store.clone());

        let out = tool
            .invoke(args(
                serde_json::json!({"amount": 5.0, "customer_name": "Ann"}),
            ))
            .await
            .unwrap();

        assert_eq!(
            out,
            "Invalid amount. Subscription is $1/month (received: $5)"
        );
        assert!(store.get("Ann").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repeated_payments_accumulate() {
        let store = Arc::new(InMemoryStore::new());
        let tool = ProcessPaymentTool::new(store.clone());
        let payment = serde_json::json!({"amount": 1.0, "customer_name": "Bob"});

        tool.invoke(args(payment.clone())).await.unwrap();
        tool.invoke(args(payment)).await.unwrap();

        let record = store.get("Bob").await.unwrap().unwrap();
        assert_eq!(record.payments.len(), 2);
    }

    #[tokio::test]
    async fn quoted_amount_is_accepted() {
        let store = Arc::new(InMemoryStore::new());
        let tool = ProcessPaymentTool::new(store.clone());

        let out = tool
            .invoke(args(
                serde_json::json!({"amount": "1.0", "customer_name": "Cleo"}),
            ))
            .await
            .unwrap();
        assert!(out.starts_with("Payment processed"));
    }

    #[tokio::test]
    async fn missing_customer_name_is_invalid_arguments() {
        let tool = ProcessPaymentTool::new(Arc::new(InMemoryStore::new()));
        let result = tool.invoke(args(serde_json::json!({"amount": 1.0}))).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn status_for_unknown_customer_suggests_payment() {
        let tool = CheckSubscriptionTool::new(Arc::new(InMemoryStore::new()));

        let out = tool
            .invoke(args(serde_json::json!({"customer_name": "Ghost"})))
            .await
            .unwrap();
        assert!(out.contains("'Ghost' not found"));
        assert!(out.contains("process payment first"));
    }

    #[tokio::test]
    async fn status_for_active_customer() {
        let store = Arc::new(InMemoryStore::new());
        ProcessPaymentTool::new(store.clone())
            .invoke(args(
                serde_json::json!({"amount": 1.0, "customer_name": "Ann"}),
            ))
            .await
            .unwrap();

        let out = CheckSubscriptionTool::new(store)
            .invoke(args(serde_json::json!({"customer_name": "Ann"})))
            .await
            .unwrap();

        assert!(out.starts_with("Ann: Active subscription"));
        assert!(out.contains("Total payments: 1"));
    }

    #[tokio::test]
    async fn status_for_inactive_customer() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = CustomerRecord::new("2026-01-01 00:00:00");
        record.status = SubscriptionStatus::Inactive;
        store.put("Dana", record).await.unwrap();

        let out = CheckSubscriptionTool::new(store)
            .invoke(args(serde_json::json!({"customer_name": "Dana"})))
            .await
            .unwrap();

        assert!(out.starts_with("Dana: Inactive subscription"));
        assert!(out.contains("Payment required"));
    }

    #[tokio::test]
    async fn list_reports_empty_ledger() {
        let tool = ListCustomersTool::new(Arc::new(InMemoryStore::new()));
        let out = tool.invoke(Map::new()).await.unwrap();
        assert_eq!(out, "No customers found in the system.");
    }

    #[tokio::test]
    async fn list_reports_every_customer() {
        let store = Arc::new(InMemoryStore::new());
        let pay = ProcessPaymentTool::new(store.clone());
        pay.invoke(args(
            serde_json::json!({"amount": 1.0, "customer_name": "Ann"}),
        ))
        .await
        .unwrap();
        pay.invoke(args(
            serde_json::json!({"amount": 1.0, "customer_name": "Bob"}),
        ))
        .await
        .unwrap();

        let out = ListCustomersTool::new(store).invoke(Map::new()).await.unwrap();
        assert!(out.starts_with("Total Customers: 2"));
        assert!(out.contains("Ann"));
        assert!(out.contains("Bob"));
        assert!(out.contains("Status: active"));
    }
}
