//! Construction helpers for expense records.
use chrono::{DateTime, SecondsFormat, Utc};
use shared::Expense;

use crate::domain::validation::ValidExpense;

/// Generate an id from the creation time in epoch milliseconds.
///
/// If another record already uses that millisecond the value is bumped until
/// it is unique within `existing`.
pub fn generate_id(now_millis: i64, existing: &[Expense]) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|e| e.id == id) {
            return id;
        }
        candidate += 1;
    }
}

/// RFC 3339 UTC timestamp with millisecond precision, e.g.
/// `2024-06-10T06:13:20.000Z`
pub fn format_created_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn build_expense(input: ValidExpense, now: DateTime<Utc>, existing: &[Expense]) -> Expense {
    Expense {
        id: generate_id(now.timestamp_millis(), existing),
        category: input.category,
        description: input.description,
        amount: input.amount,
        created_at: format_created_at(now),
    }
}

/// Sum of all amounts; 0.0 for an empty collection
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}
