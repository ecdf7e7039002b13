//! Sync orchestration between the local expense store and the remote collection.
//!
//! Each operation picks its own ordering of local mutation and remote call:
//!
//! | Operation | Ordering |
//! |-----------|----------|
//! | load      | remote list, then replace the store |
//! | create    | remote create (for the authoritative id), then add locally |
//! | update    | local update first, then remote update; no rollback on failure |
//! | delete    | remote delete, then remove locally |
//!
//! Every operation moves its key through `Idle -> Pending -> Succeeded | Failed`.
//! A second operation with the same kind and target is refused while the
//! first is pending; unrelated operations may run concurrently. The store is
//! only borrowed between suspension points, never across a remote call.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use shared::{Expense, ExpenseDraft, ExpensePatch};
use tracing::{info, warn};

use super::expense_form::ExpenseForm;
use super::expense_store::{ExpenseStore, SharedExpenseStore};
use crate::error::{NetworkError, Result, StoreError, SyncError};
use crate::services::RemoteSyncClient;

/// Class of orchestrated operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Load,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Fixed user-facing message shown when the remote call fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            OperationKind::Load => "Could not fetch expenses.",
            OperationKind::Create | OperationKind::Update => {
                "Could not save data, please try again later."
            }
            OperationKind::Delete => "Could not delete expense, please try again later.",
        }
    }

    /// Update and delete both write to an existing record
    pub fn is_write(&self) -> bool {
        matches!(self, OperationKind::Update | OperationKind::Delete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Load => "load",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation kind plus the expense it targets (none for load and create)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub kind: OperationKind,
    pub target: Option<String>,
}

impl OperationKey {
    pub fn new(kind: OperationKind, target: Option<&str>) -> Self {
        Self {
            kind,
            target: target.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    /// Settled with an error; carries the user-facing message
    Failed(String),
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }
}

type OperationTable = RefCell<HashMap<OperationKey, OperationState>>;

/// Marks a key pending for as long as it lives. Dropping it unsettled (the
/// operation's future was dropped, or it bailed out before the remote call)
/// returns the key to `Idle`.
struct PendingOperation<'a> {
    operations: &'a OperationTable,
    key: OperationKey,
    settled: bool,
}

impl PendingOperation<'_> {
    fn settle<T>(mut self, result: Result<T>) -> Result<T> {
        let state = match &result {
            Ok(_) => OperationState::Succeeded,
            Err(error) => OperationState::Failed(error.user_message()),
        };
        self.operations.borrow_mut().insert(self.key.clone(), state);
        self.settled = true;
        result
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut operations) = self.operations.try_borrow_mut() {
            operations.insert(self.key.clone(), OperationState::Idle);
        }
    }
}

/// Coordinates `ExpenseStore` mutations with `RemoteSyncClient` calls
pub struct SyncOrchestrator {
    remote: Arc<dyn RemoteSyncClient>,
    store: SharedExpenseStore,
    operations: OperationTable,
}

impl SyncOrchestrator {
    pub fn new(remote: Arc<dyn RemoteSyncClient>, store: SharedExpenseStore) -> Self {
        Self {
            remote,
            store,
            operations: RefCell::new(HashMap::new()),
        }
    }

    /// Read-only view of the store
    pub fn store(&self) -> Ref<'_, ExpenseStore> {
        self.store.borrow()
    }

    /// Handle to the store for other read-only consumers
    pub fn shared_store(&self) -> SharedExpenseStore {
        self.store.clone()
    }

    pub fn snapshot(&self) -> Vec<Expense> {
        self.store.borrow().expenses().to_vec()
    }

    pub fn expense(&self, id: &str) -> Option<Expense> {
        self.store.borrow().get(id).cloned()
    }

    pub fn status(&self, kind: OperationKind, target: Option<&str>) -> OperationState {
        self.operations
            .borrow()
            .get(&OperationKey::new(kind, target))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_pending(&self, kind: OperationKind, target: Option<&str>) -> bool {
        self.status(kind, target).is_pending()
    }

    fn begin(&self, kind: OperationKind, target: Option<&str>) -> Result<PendingOperation<'_>> {
        let key = OperationKey::new(kind, target);
        let mut operations = self.operations.borrow_mut();
        let pending = |other: OperationKind| {
            operations
                .get(&OperationKey::new(other, target))
                .is_some_and(OperationState::is_pending)
        };
        // At most one write per record may be in flight.
        let blocked = if kind.is_write() && target.is_some() {
            pending(OperationKind::Update) || pending(OperationKind::Delete)
        } else {
            pending(kind)
        };
        if blocked {
            warn!("Refusing {} for {:?}: already in progress", kind, target);
            return Err(SyncError::AlreadyPending { kind });
        }
        operations.insert(key.clone(), OperationState::Pending);

        Ok(PendingOperation {
            operations: &self.operations,
            key,
            settled: false,
        })
    }

    fn remote_failure(&self, kind: OperationKind, source: NetworkError) -> SyncError {
        warn!("❌ Remote {} failed: {}", kind, source);
        SyncError::Remote { kind, source }
    }

    fn store_failure(&self, kind: OperationKind, source: StoreError) -> SyncError {
        warn!("❌ Local {} failed: {}", kind, source);
        SyncError::Store { kind, source }
    }

    fn ensure_present(&self, kind: OperationKind, id: &str) -> Result<()> {
        if self.store.borrow().contains(id) {
            Ok(())
        } else {
            Err(self.store_failure(kind, StoreError::NotFound(id.to_string())))
        }
    }

    /// Fetch the remote collection and install it as the new snapshot
    pub async fn load(&self) -> Result<Vec<Expense>> {
        let pending = self.begin(OperationKind::Load, None)?;
        info!("📥 Loading expenses");

        let result = match self.remote.list().await {
            Ok(expenses) => {
                info!("✅ Loaded {} expenses", expenses.len());
                Ok(self.store.borrow_mut().replace_all(expenses).to_vec())
            }
            Err(error) => Err(self.remote_failure(OperationKind::Load, error)),
        };
        pending.settle(result)
    }

    /// Persist a new expense remotely, then add it locally under the server id
    pub async fn create(&self, draft: ExpenseDraft) -> Result<Vec<Expense>> {
        let pending = self.begin(OperationKind::Create, None)?;
        info!("💾 Creating expense '{}' ({:.2})", draft.description, draft.amount);

        let result = match self.remote.create(&draft).await {
            Ok(id) => {
                info!("✅ Created expense {}", id);
                self.store
                    .borrow_mut()
                    .add(Expense::from_draft(id, draft))
                    .map(<[Expense]>::to_vec)
                    .map_err(|error| self.store_failure(OperationKind::Create, error))
            }
            Err(error) => Err(self.remote_failure(OperationKind::Create, error)),
        };
        pending.settle(result)
    }

    /// Apply the change locally, then persist it. A failed remote call leaves
    /// the local change in place and only reports the error.
    pub async fn update(&self, id: &str, draft: ExpenseDraft) -> Result<Vec<Expense>> {
        self.ensure_present(OperationKind::Update, id)?;
        let pending = self.begin(OperationKind::Update, Some(id))?;
        info!("✏️ Updating expense {}", id);

        self.store
            .borrow_mut()
            .update(id, &ExpensePatch::from(draft.clone()))
            .map(|_| ())
            .map_err(|error| self.store_failure(OperationKind::Update, error))?;

        let result = match self.remote.update(id, &draft).await {
            Ok(()) => Ok(self.snapshot()),
            Err(error) => Err(self.remote_failure(OperationKind::Update, error)),
        };
        pending.settle(result)
    }

    /// Delete remotely, then remove locally. Nothing changes locally when the
    /// remote call fails.
    pub async fn delete(&self, id: &str) -> Result<Vec<Expense>> {
        self.ensure_present(OperationKind::Delete, id)?;
        let pending = self.begin(OperationKind::Delete, Some(id))?;
        info!("🗑️ Deleting expense {}", id);

        let result = match self.remote.delete(id).await {
            Ok(()) => self
                .store
                .borrow_mut()
                .remove(id)
                .map(<[Expense]>::to_vec)
                .map_err(|error| self.store_failure(OperationKind::Delete, error)),
            Err(error) => Err(self.remote_failure(OperationKind::Delete, error)),
        };
        pending.settle(result)
    }

    /// Submit handler of the manage-expense screen: run the form gate, then
    /// create or update depending on the form mode. Invalid input never
    /// reaches the remote collection.
    pub async fn confirm(&self, form: &mut ExpenseForm) -> Result<Vec<Expense>> {
        let draft = form.submit().map_err(SyncError::Validation)?;
        match form.editing_id().map(str::to_string) {
            Some(id) => self.update(&id, draft).await,
            None => self.create(draft).await,
        }
    }
}
