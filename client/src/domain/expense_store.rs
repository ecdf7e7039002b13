//! In-memory expense store.
//!
//! Holds the client's current view of the remote collection. All writes go
//! through `replace_all`, `add`, `update` and `remove`; each is synchronous and
//! has no network effect of its own. Identifiers are unique at all times.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use shared::{Expense, ExpensePatch};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Store handle shared between the orchestrator and read-only consumers
pub type SharedExpenseStore = Rc<RefCell<ExpenseStore>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedExpenseStore {
        Rc::new(RefCell::new(self))
    }

    /// Current snapshot in arrival order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }

    /// Install a fresh listing. A repeated identifier keeps its first occurrence.
    pub fn replace_all(&mut self, records: Vec<Expense>) -> &[Expense] {
        let mut seen = HashSet::with_capacity(records.len());
        let mut expenses = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id.clone()) {
                expenses.push(record);
            } else {
                warn!("Dropping duplicate expense {} from listing", record.id);
            }
        }

        debug!("Store replaced with {} expenses", expenses.len());
        self.expenses = expenses;
        &self.expenses
    }

    pub fn add(&mut self, record: Expense) -> Result<&[Expense], StoreError> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        debug!("Store add {}", record.id);
        self.expenses.push(record);
        Ok(&self.expenses)
    }

    /// Merge `patch` over the stored record; identifiers never change here
    pub fn update(&mut self, id: &str, patch: &ExpensePatch) -> Result<&[Expense], StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        debug!("Store update {}", id);
        self.expenses[index] = self.expenses[index].merged(patch);
        Ok(&self.expenses)
    }

    pub fn remove(&mut self, id: &str) -> Result<&[Expense], StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        debug!("Store remove {}", id);
        self.expenses.remove(index);
        Ok(&self.expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(id: &str, amount: f64, description: &str) -> Expense {
        Expense {
            id: id.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            description: description.to_string(),
        }
    }

    fn seeded_store() -> ExpenseStore {
        let mut store = ExpenseStore::new();
        store.replace_all(vec![
            expense("a", 10.0, "Coffee"),
            expense("b", 25.5, "Groceries"),
        ]);
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ExpenseStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_add_then_lookup() {
        let mut store = seeded_store();
        let record = expense("c", 4.2, "Bus ticket");

        let snapshot = store.add(record.clone()).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.last(), Some(&record));
        assert_eq!(store.get("c"), Some(&record));
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut store = seeded_store();

        let result = store.add(expense("a", 1.0, "Other"));

        assert_eq!(result, Err(StoreError::DuplicateId("a".to_string())));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().description, "Coffee");
    }

    #[test]
    fn test_remove() {
        let mut store = seeded_store();

        let snapshot = store.remove("a").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(store.get("a").is_none());
        assert!(store.contains("b"));
    }

    #[test]
    fn test_remove_missing() {
        let mut store = seeded_store();

        let result = store.remove("zzz");

        assert_eq!(result, Err(StoreError::NotFound("zzz".to_string())));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_preserves_unpatched_fields() {
        let mut store = seeded_store();
        let patch = ExpensePatch {
            description: Some("Espresso".to_string()),
            ..Default::default()
        };

        let snapshot = store.update("a", &patch).unwrap();
        assert_eq!(snapshot.len(), 2);

        let updated = store.get("a").unwrap();
        assert_eq!(updated.description, "Espresso");
        assert_eq!(updated.amount, 10.0);
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(store.expenses()[0].id, "a");
    }

    #[test]
    fn test_update_missing() {
        let mut store = seeded_store();

        let result = store.update("zzz", &ExpensePatch::default());

        assert_eq!(result, Err(StoreError::NotFound("zzz".to_string())));
    }

    #[test]
    fn test_replace_all_keeps_order_and_drops_duplicates() {
        let mut store = seeded_store();

        let snapshot = store.replace_all(vec![
            expense("z", 1.0, "First"),
            expense("y", 2.0, "Second"),
            expense("z", 3.0, "Repeat"),
        ]);

        let ids: Vec<&str> = snapshot.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "y"]);
        assert_eq!(store.get("z").unwrap().description, "First");
        assert!(!store.contains("a"));
    }
}
