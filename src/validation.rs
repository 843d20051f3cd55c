use serde_json::{Map, Value};

/// Returns every required field absent from the payload, in declaration
/// order. A key present with JSON null counts as present; the database
/// surface rejects it downstream if the column is NOT NULL.
pub fn missing_fields(payload: &Map<String, Value>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !payload.contains_key(*field))
        .collect()
}
