//! Canned insight reports for the cause and medical forms.
//!
//! Both forms only template what the user typed; there is no analysis
//! behind them. Required fields are checked before a report is produced.

mod cause;
mod medical;

pub use cause::{CauseForm, CauseReport};
pub use medical::{MedicalForm, MedicalReport};

use crate::error::ValidationError;

/// Fail with a "Please fill in ..." message when `value` is blank.
fn require(value: &str, field: &str, label: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(
            field,
            format!("Please fill in the {label} field."),
        ))
    } else {
        Ok(())
    }
}

/// `value`, or `fallback` when it is blank.
fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
