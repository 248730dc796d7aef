use serde_json::Value;

use socialfed_common::ids::doc_id;

use crate::store::Document;

/// How a single field is constrained.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    In(Vec<Value>),
}

/// Conjunction of per-field conditions, the subset of the document store's
/// filter language this service needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Condition)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses
            .push((field.to_string(), Condition::Eq(value.into())));
        self
    }

    /// Require `field` to equal one of `values`.
    pub fn is_in<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.clauses.push((field.to_string(), Condition::In(values)));
        self
    }

    pub fn clauses(&self) -> &[(String, Condition)] {
        &self.clauses
    }

    /// Evaluate the filter against a document. Numbers compare by value
    /// regardless of integer/double representation.
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|(field, condition)| {
            let Some(actual) = doc.get(field) else {
                return false;
            };
            match condition {
                Condition::Eq(expected) => values_equal(actual, expected),
                Condition::In(options) => options.iter().any(|o| values_equal(actual, o)),
            }
        })
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (doc_id(a), doc_id(b)) {
            (Some(i), Some(j)) => i == j,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}
