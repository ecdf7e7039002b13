//! # Remote Sync Trait
//!
//! Abstraction over the remote expense collection so the orchestrator can be
//! driven by the HTTP client, the in-process collection, or a test stub.
//!
//! Every method is one independent round trip. Implementations hold no state
//! between calls that the orchestrator relies on and never retry.

use async_trait::async_trait;
use shared::{Expense, ExpenseDraft};

use crate::error::NetworkError;

#[async_trait]
pub trait RemoteSyncClient: Send + Sync {
    /// Fetch the full remote collection
    async fn list(&self) -> Result<Vec<Expense>, NetworkError>;

    /// Persist a new expense and return its server-assigned identifier
    async fn create(&self, draft: &ExpenseDraft) -> Result<String, NetworkError>;

    /// Replace the expense identified by `id`
    async fn update(&self, id: &str, draft: &ExpenseDraft) -> Result<(), NetworkError>;

    /// Remove the expense identified by `id`
    async fn delete(&self, id: &str) -> Result<(), NetworkError>;
}
