//! # Expense Tracker Client
//!
//! Client-side core of the expense tracker: an in-memory expense store kept in
//! step with a remote expense collection, and the validation gate in front of
//! every write.
//!
//! ```text
//! form / screen
//!     ↓
//! domain::validation      (writes only)
//!     ↓
//! domain::sync_orchestrator
//!     ↓                ↓
//! services::remote   domain::expense_store
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use config::ClientConfig;
pub use domain::{
    ExpenseForm, ExpenseStore, ExpensesSummary, OperationKind, OperationState, ScreenState,
    SharedExpenseStore, SyncOrchestrator, ValidationEngine,
};
pub use error::{NetworkError, StoreError, SyncError};
pub use services::{ApiClient, InMemoryRemote, RemoteSyncClient};
