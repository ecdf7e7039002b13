//! Expense form validation.
//!
//! Pure functions that decide whether a candidate expense may enter the store.
//! Every field is judged independently so the form can highlight exactly the
//! offending inputs, and the candidate is rejected as soon as any one field
//! fails.

use chrono::NaiveDate;
use shared::{ExpenseDraft, ExpenseField, ExpenseFormValidation, DATE_FORMAT};

/// Message shown under the form whenever at least one field is invalid
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input values - please check your entered data!";

/// Raw text entered into the expense form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseInput {
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl ExpenseInput {
    pub fn new(
        amount: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            date: date.into(),
            description: description.into(),
        }
    }
}

/// Validation engine for expense candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate each field of the candidate
    pub fn validate(&self, candidate: &ExpenseInput) -> ExpenseFormValidation {
        ExpenseFormValidation {
            amount_valid: parse_amount(&candidate.amount).is_some(),
            date_valid: parse_date(&candidate.date).is_some(),
            description_valid: !candidate.description.trim().is_empty(),
        }
    }

    /// Run the gate and build the draft that will be sent to the remote collection.
    /// Returns the per-field result when any field is invalid.
    pub fn to_draft(&self, candidate: &ExpenseInput) -> Result<ExpenseDraft, ExpenseFormValidation> {
        let validation = self.validate(candidate);
        match (
            parse_amount(&candidate.amount),
            parse_date(&candidate.date),
            validation.description_valid,
        ) {
            (Some(amount), Some(date), true) => Ok(ExpenseDraft {
                amount,
                date,
                description: candidate.description.trim().to_string(),
            }),
            _ => Err(validation),
        }
    }

    /// User-facing message for a single invalid field
    pub fn error_message(&self, field: ExpenseField) -> &'static str {
        match field {
            ExpenseField::Amount => "Please enter an amount greater than 0",
            ExpenseField::Date => "Please enter a valid date (YYYY-MM-DD)",
            ExpenseField::Description => "Please enter a description",
        }
    }

    /// Messages for every invalid field, in form order
    pub fn error_messages(&self, validation: &ExpenseFormValidation) -> Vec<&'static str> {
        validation
            .invalid_fields()
            .into_iter()
            .map(|field| self.error_message(field))
            .collect()
    }
}

/// Parse an amount field. Only finite values strictly above zero are accepted.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Parse a date field into a real calendar date
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ValidationEngine {
        ValidationEngine::new()
    }

    #[test]
    fn test_validate_success() {
        let validation = engine().validate(&ExpenseInput::new("19.99", "2024-03-15", "  Lunch "));

        assert!(validation.is_valid());
        assert!(validation.invalid_fields().is_empty());
    }

    #[test]
    fn test_to_draft_trims_and_parses() {
        let draft = engine()
            .to_draft(&ExpenseInput::new("19.99", "2024-03-15", "  Lunch "))
            .unwrap();

        assert_eq!(draft.amount, 19.99);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(draft.description, "Lunch");
    }

    #[test]
    fn test_all_fields_invalid() {
        let validation = engine().validate(&ExpenseInput::new("-5", "2024-13-40", ""));

        assert!(!validation.amount_valid);
        assert!(!validation.date_valid);
        assert!(!validation.description_valid);
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_single_invalid_field_rejects() {
        let validation = engine().validate(&ExpenseInput::new("10", "2024-01-01", ""));

        assert!(validation.amount_valid);
        assert!(validation.date_valid);
        assert!(!validation.description_valid);
        assert!(!validation.is_valid());
        assert_eq!(validation.invalid_fields(), vec![ExpenseField::Description]);

        let rejected = engine().to_draft(&ExpenseInput::new("10", "2024-01-01", ""));
        assert_eq!(rejected, Err(validation));
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(parse_amount("10"), Some(10.0));
        assert_eq!(parse_amount(" 0.5 "), Some(0.5));
        assert_eq!(parse_amount("1e2"), Some(100.0));

        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("12.3.4"), None);
    }

    #[test]
    fn test_date_rules() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date(" 2024-01-01 "), NaiveDate::from_ymd_opt(2024, 1, 1));

        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-13-40"), None);
        assert_eq!(parse_date("15/03/2024"), None);
        assert_eq!(parse_date("Invalid Date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_error_messages() {
        let validation = engine().validate(&ExpenseInput::new("abc", "2024-01-01", " "));
        let messages = engine().error_messages(&validation);

        assert_eq!(
            messages,
            vec!["Please enter an amount greater than 0", "Please enter a description"]
        );
    }
}
