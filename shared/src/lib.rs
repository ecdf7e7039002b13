use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date format used by expense forms and on the wire (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense as held by the client store and the remote collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the remote collection
    pub id: String,
    /// Amount spent (always positive for records that passed the form gate)
    pub amount: f64,
    /// Calendar date of the expense, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Free-text description, trimmed
    pub description: String,
}

impl Expense {
    /// Attach an identifier to a draft
    pub fn from_draft(id: impl Into<String>, draft: ExpenseDraft) -> Self {
        Self {
            id: id.into(),
            amount: draft.amount,
            date: draft.date,
            description: draft.description,
        }
    }

    /// The record without its identifier, as sent on create/update
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
        }
    }

    /// Merge a patch over this record, keeping every field the patch leaves unset
    pub fn merged(&self, patch: &ExpensePatch) -> Self {
        Self {
            id: self.id.clone(),
            amount: patch.amount.unwrap_or(self.amount),
            date: patch.date.unwrap_or(self.date),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
        }
    }

    /// Date rendered the way the expense form expects it
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// An expense without identifier: the body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
}

/// Partial update applied to a stored expense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl From<ExpenseDraft> for ExpensePatch {
    fn from(draft: ExpenseDraft) -> Self {
        Self {
            amount: Some(draft.amount),
            date: Some(draft.date),
            description: Some(draft.description),
        }
    }
}

/// Response returned by the remote collection after a create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    /// Generated identifier. Realtime-database style backends call it `name`.
    #[serde(alias = "name")]
    pub id: String,
}

/// Input fields of the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseField {
    Amount,
    Date,
    Description,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 3] = [
        ExpenseField::Amount,
        ExpenseField::Date,
        ExpenseField::Description,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseField::Amount => "Amount",
            ExpenseField::Date => "Date",
            ExpenseField::Description => "Description",
        }
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text of one form field plus its last evaluated validity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInput {
    pub value: String,
    pub is_valid: bool,
}

impl FieldInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: true,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }
}

/// Per-field validity of a candidate expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFormValidation {
    pub amount_valid: bool,
    pub date_valid: bool,
    pub description_valid: bool,
}

impl ExpenseFormValidation {
    /// The gate: every field must be valid
    pub fn is_valid(&self) -> bool {
        self.amount_valid && self.date_valid && self.description_valid
    }

    pub fn is_field_valid(&self, field: ExpenseField) -> bool {
        match field {
            ExpenseField::Amount => self.amount_valid,
            ExpenseField::Date => self.date_valid,
            ExpenseField::Description => self.description_valid,
        }
    }

    /// Fields that failed validation, in form order
    pub fn invalid_fields(&self) -> Vec<ExpenseField> {
        ExpenseField::ALL
            .into_iter()
            .filter(|field| !self.is_field_valid(*field))
            .collect()
    }
}
