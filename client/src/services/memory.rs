//! In-process expense collection.
//!
//! Behaves like the remote service (generated identifiers, 404 on unknown
//! ids) without a network. Used when no base URL is configured and as a
//! scriptable remote in tests: an outage can be switched on per operation.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use shared::{Expense, ExpenseDraft};
use uuid::Uuid;

use super::remote::RemoteSyncClient;
use crate::domain::sync_orchestrator::OperationKind;
use crate::error::NetworkError;

/// Number of calls received per operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoteCalls {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl RemoteCalls {
    pub fn total(&self) -> usize {
        self.list + self.create + self.update + self.delete
    }
}

#[derive(Debug, Default)]
struct Inner {
    expenses: Vec<Expense>,
    failing: HashSet<OperationKind>,
    calls: RemoteCalls,
}

#[derive(Debug, Default)]
pub struct InMemoryRemote {
    inner: Mutex<Inner>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let remote = Self::new();
        remote.lock().expenses = expenses;
        remote
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every call of `kind` fail with a connection error until cleared
    pub fn set_failing(&self, kind: OperationKind, failing: bool) {
        let mut inner = self.lock();
        if failing {
            inner.failing.insert(kind);
        } else {
            inner.failing.remove(&kind);
        }
    }

    /// Copy of the remote collection
    pub fn expenses(&self) -> Vec<Expense> {
        self.lock().expenses.clone()
    }

    pub fn calls(&self) -> RemoteCalls {
        self.lock().calls
    }

    fn check_available(inner: &Inner, kind: OperationKind) -> Result<(), NetworkError> {
        if inner.failing.contains(&kind) {
            return Err(NetworkError::Connection(format!(
                "simulated outage during {}",
                kind
            )));
        }
        Ok(())
    }

    fn not_found(id: &str) -> NetworkError {
        NetworkError::Status {
            status: 404,
            body: format!("expense {} not found", id),
        }
    }
}

#[async_trait]
impl RemoteSyncClient for InMemoryRemote {
    async fn list(&self) -> Result<Vec<Expense>, NetworkError> {
        let mut inner = self.lock();
        inner.calls.list += 1;
        Self::check_available(&inner, OperationKind::Load)?;
        Ok(inner.expenses.clone())
    }

    async fn create(&self, draft: &ExpenseDraft) -> Result<String, NetworkError> {
        let mut inner = self.lock();
        inner.calls.create += 1;
        Self::check_available(&inner, OperationKind::Create)?;

        let id = Uuid::new_v4().to_string();
        inner.expenses.push(Expense::from_draft(id.clone(), draft.clone()));
        Ok(id)
    }

    async fn update(&self, id: &str, draft: &ExpenseDraft) -> Result<(), NetworkError> {
        let mut inner = self.lock();
        inner.calls.update += 1;
        Self::check_available(&inner, OperationKind::Update)?;

        let expense = inner
            .expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        *expense = Expense::from_draft(id, draft.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), NetworkError> {
        let mut inner = self.lock();
        inner.calls.delete += 1;
        Self::check_available(&inner, OperationKind::Delete)?;

        let before = inner.expenses.len();
        inner.expenses.retain(|expense| expense.id != id);
        if inner.expenses.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
