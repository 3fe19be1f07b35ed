//! Validation of submitted expense forms.

use shared::AddExpenseRequest;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,
    #[error("Amount must be a valid number")]
    InvalidAmount,
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
}

/// Trimmed, parsed form fields ready to become a record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// Parse the amount text strictly: the whole trimmed input must be a finite
/// number.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or(ValidationError::InvalidAmount)
}

pub fn validate_expense(request: &AddExpenseRequest) -> Result<ValidExpense, ValidationError> {
    let category = request.category.trim();
    let description = request.description.trim();
    let amount_input = request.amount.trim();

    if category.is_empty() || description.is_empty() || amount_input.is_empty() {
        return Err(ValidationError::MissingField);
    }

    let amount = parse_amount(amount_input)?;
    if amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }

    Ok(ValidExpense {
        category: category.to_string(),
        description: description.to_string(),
        amount,
    })
}
