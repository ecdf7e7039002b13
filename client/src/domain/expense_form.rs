//! Field-input state for one open expense form.
//!
//! A form is created when the manage-expense screen opens, either blank or
//! pre-populated from a stored expense. Keystrokes replace a field's value and
//! optimistically mark it valid again; validity is only re-evaluated on
//! submit. The form is dropped when the screen goes away.

use shared::{Expense, ExpenseDraft, ExpenseField, FieldInput};

use super::validation::{ExpenseInput, ValidationEngine, INVALID_INPUT_MESSAGE};

/// Whether the form adds a new expense or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { expense_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    mode: FormMode,
    amount: FieldInput,
    date: FieldInput,
    description: FieldInput,
    validation: ValidationEngine,
}

impl ExpenseForm {
    /// Empty form for a new expense
    pub fn new() -> Self {
        Self {
            mode: FormMode::Add,
            amount: FieldInput::empty(),
            date: FieldInput::empty(),
            description: FieldInput::empty(),
            validation: ValidationEngine::new(),
        }
    }

    /// Form pre-populated from an existing expense
    pub fn for_expense(expense: &Expense) -> Self {
        Self {
            mode: FormMode::Edit {
                expense_id: expense.id.clone(),
            },
            amount: FieldInput::new(expense.amount.to_string()),
            date: FieldInput::new(expense.formatted_date()),
            description: FieldInput::new(expense.description.clone()),
            validation: ValidationEngine::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Identifier of the expense being edited, if any
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Add => None,
            FormMode::Edit { expense_id } => Some(expense_id),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Expense",
            FormMode::Edit { .. } => "Edit Expense",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add",
            FormMode::Edit { .. } => "Update",
        }
    }

    pub fn field(&self, field: ExpenseField) -> &FieldInput {
        match field {
            ExpenseField::Amount => &self.amount,
            ExpenseField::Date => &self.date,
            ExpenseField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: ExpenseField) -> &mut FieldInput {
        match field {
            ExpenseField::Amount => &mut self.amount,
            ExpenseField::Date => &mut self.date,
            ExpenseField::Description => &mut self.description,
        }
    }

    /// Keystroke handler: store the new text and clear the field's error
    pub fn set_field(&mut self, field: ExpenseField, value: impl Into<String>) {
        *self.field_mut(field) = FieldInput::new(value);
    }

    /// Current text of every field
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput::new(
            self.amount.value.clone(),
            self.date.value.clone(),
            self.description.value.clone(),
        )
    }

    /// Re-evaluate every field. On failure each field's validity is updated so
    /// the form can highlight the offending inputs and nothing is returned.
    pub fn submit(&mut self) -> Result<ExpenseDraft, shared::ExpenseFormValidation> {
        let input = self.input();
        match self.validation.to_draft(&input) {
            Ok(draft) => Ok(draft),
            Err(validation) => {
                for field in ExpenseField::ALL {
                    self.field_mut(field).is_valid = validation.is_field_valid(field);
                }
                Err(validation)
            }
        }
    }

    /// Combined invalid-state indicator
    pub fn is_invalid(&self) -> bool {
        ExpenseField::ALL
            .iter()
            .any(|field| !self.field(*field).is_valid)
    }

    /// Text of the combined indicator, shown only while some field is invalid
    pub fn error_text(&self) -> Option<&'static str> {
        self.is_invalid().then_some(INVALID_INPUT_MESSAGE)
    }
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self::new()
    }
}
