use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single recorded expense.
///
/// The serialized form is the document format of every store: the JSON file,
/// the key-value value and the browser mirror all hold an array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Timestamp-derived identifier (epoch milliseconds), immutable
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub description: String,
    /// Positive when created; coerced to 0.0 when a stored value is unusable
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub amount: f64,
    /// Creation time (RFC 3339, UTC)
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub created_at: String,
}

/// Coerce a stored amount to a number, falling back to 0.0.
///
/// Numbers pass through, numeric strings are parsed, everything else
/// (null, booleans, garbage text, non-finite values) becomes 0.0.
pub fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0.0))
}

/// Coerce a stored text field: strings pass through, numbers and booleans are
/// rendered as text, anything else becomes empty.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_text).unwrap_or_default())
}

/// Accepts the amount field as typed text or as a bare JSON number.
fn deserialize_form_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient_string(deserializer)
}

/// Render an amount the way the total card shows it, e.g. `$12.50`.
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Raw form submission for a new expense.
///
/// Fields are kept as text; validation happens in the domain layer so that
/// missing, blank and malformed input all produce a readable message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddExpenseRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_form_field")]
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseResponse {
    pub success: bool,
    pub expense: Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub success: bool,
    /// False when no expense had the requested id
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTotalResponse {
    pub total: f64,
    pub formatted_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
}

/// Error body returned for rejected requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
