//! # Domain Module
//!
//! Business rules for the expense tracker: form validation, record
//! construction, and the add/delete/list/total operations over whichever
//! storage backend is active.

pub mod expense_service;
pub mod models;
pub mod validation;

pub use expense_service::{ExpenseError, ExpenseListing, ExpenseService};
pub use validation::{validate_expense, ValidExpense, ValidationError};
