//! Identifier bridge between the two stores.
//!
//! The document store hands identifiers out as JSON numbers (sometimes as
//! doubles, depending on how a collection was loaded), the graph store
//! returns 64-bit integers, and responses carry identifiers as decimal
//! strings. Every crossing goes through one of these functions.

use serde_json::Value;

/// Canonical integer for a document-store identifier value.
/// Accepts integers, integral doubles and decimal strings; anything else is `None`.
pub fn doc_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read `field` from each document row and bridge it to the canonical integer.
/// Rows where the field is missing or not an identifier are skipped.
pub fn doc_ids<'a, I>(rows: I, field: &str) -> Vec<i64>
where
    I: IntoIterator<Item = &'a serde_json::Map<String, Value>>,
{
    rows.into_iter()
        .filter_map(|row| row.get(field).and_then(doc_id))
        .collect()
}

/// Document-store value used when filtering on an identifier.
pub fn to_doc(id: i64) -> Value {
    Value::from(id)
}

/// Response form of a graph-store integer identifier.
pub fn to_wire(id: i64) -> String {
    id.to_string()
}
