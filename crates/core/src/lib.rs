//! Core domain types and traits for Troupe.
//!
//! This crate defines the contracts the rest of the workspace is built
//! against: the [`CompletionClient`] trait for talking to a language
//! model, the [`Tool`] trait and [`ToolSet`] for persona capabilities,
//! the [`Persona`] value object, the [`Transcript`] that accumulates a
//! single ReAct conversation, and the [`RecordStore`] trait for the
//! persisted customer ledger.

pub mod client;
pub mod error;
pub mod persona;
pub mod record;
pub mod tool;
pub mod transcript;

pub use client::CompletionClient;
pub use error::{ClientError, Error, Result, StoreError, ToolError};
pub use persona::Persona;
pub use record::{CustomerRecord, Payment, RecordStore, SubscriptionStatus};
pub use tool::{Tool, ToolSet};
pub use transcript::Transcript;
