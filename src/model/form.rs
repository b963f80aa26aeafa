//! Raw form payload validation
//!
//! Validates the text a user typed into the expense form into an
//! [`ExpenseDraft`]. The coordinator only ever receives already-validated
//! drafts; this is the gate.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ExpenseDraft;

// == Form Field ==
/// Identifies which form field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    Date,
}

// == Validation Error ==
/// Structured validation failure listing every invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid form input: {fields:?}")]
pub struct ValidationError {
    /// All fields that failed validation, in form order
    pub fields: Vec<FormField>,
}

// == Form Payload ==
/// Raw, untrusted form input as text.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    pub description: String,
    pub amount: String,
    pub date: String,
}

impl FormPayload {
    /// Validates the payload into an [`ExpenseDraft`].
    ///
    /// Rules:
    /// - description is non-empty after trimming
    /// - amount parses as a positive finite decimal
    /// - date parses as `YYYY-MM-DD`
    ///
    /// All invalid fields are reported together rather than stopping at the
    /// first failure.
    pub fn validate(&self) -> Result<ExpenseDraft, ValidationError> {
        let mut fields = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            fields.push(FormField::Description);
        }

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(value) if value > 0.0 && value.is_finite() => Some(value),
            _ => {
                fields.push(FormField::Amount);
                None
            }
        };

        let date = match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(value) => Some(value),
            Err(_) => {
                fields.push(FormField::Date);
                None
            }
        };

        if !fields.is_empty() {
            return Err(ValidationError { fields });
        }

        Ok(ExpenseDraft {
            description: description.to_string(),
            // Both unwraps are unreachable: a None pushed its field above
            amount: amount.unwrap(),
            date: date.unwrap(),
        })
    }
}
