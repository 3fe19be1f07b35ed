//! Decoding of stored collections.
//!
//! Records are decoded one by one so a single unusable entry cannot hide the
//! rest of the collection. Field-level coercion lives on [`shared::Expense`].

use serde_json::Value;
use shared::Expense;
use tracing::warn;

use super::traits::StorageError;

/// Decode a stored value into expenses.
///
/// Anything other than an array is [`StorageError::NotACollection`]. Array
/// entries that are not records are dropped with a warning.
pub fn decode_collection(value: Value, location: &str) -> Result<Vec<Expense>, StorageError> {
    let Value::Array(items) = value else {
        return Err(StorageError::NotACollection {
            location: location.to_string(),
        });
    };

    let mut expenses = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Expense>(item) {
            Ok(expense) => expenses.push(expense),
            Err(e) => warn!("Skipping unreadable expense #{} in '{}': {}", index, location, e),
        }
    }
    Ok(expenses)
}
