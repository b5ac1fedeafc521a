//! Helpers for reading loosely typed sensor fields

use serde_json::{Map, Value};

use crate::RecordError;

/// Named fields of one sensor reading, looked up by name
///
/// Keys are kept sorted, not in driver order.
pub type Fields = Map<String, Value>;

/// Read a finite number from a JSON number or a numeric string
pub fn number(fields: &Fields, name: &str) -> Result<f64, RecordError> {
    let value = fields
        .get(name)
        .ok_or_else(|| RecordError::MissingField(name.to_string()))?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(RecordError::NotNumeric {
            field: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Read a finite, non-negative particle count
pub fn count(fields: &Fields, name: &str) -> Result<f64, RecordError> {
    let value = number(fields, name)?;
    if value < 0.0 {
        return Err(RecordError::NegativeCount {
            field: name.to_string(),
            value,
        });
    }
    Ok(value)
}
