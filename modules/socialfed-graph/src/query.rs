use std::collections::HashMap;

use socialfed_common::error::{FederationError, Result};

/// Parameter bound into a pattern query.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphParam {
    Int(i64),
    Text(String),
    IntList(Vec<i64>),
}

impl From<i64> for GraphParam {
    fn from(v: i64) -> Self {
        GraphParam::Int(v)
    }
}

impl From<&str> for GraphParam {
    fn from(v: &str) -> Self {
        GraphParam::Text(v.to_string())
    }
}

impl From<String> for GraphParam {
    fn from(v: String) -> Self {
        GraphParam::Text(v)
    }
}

impl From<Vec<i64>> for GraphParam {
    fn from(v: Vec<i64>) -> Self {
        GraphParam::IntList(v)
    }
}

/// Native type a result column is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Text,
}

/// A named, parametrized pattern query together with the columns it returns.
///
/// The name identifies the query independently of its Cypher text, which is
/// what test doubles key their canned answers on.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQuery {
    pub name: &'static str,
    pub cypher: &'static str,
    pub params: Vec<(&'static str, GraphParam)>,
    pub columns: Vec<(&'static str, ColumnKind)>,
}

impl GraphQuery {
    pub fn new(name: &'static str, cypher: &'static str) -> Self {
        Self {
            name,
            cypher,
            params: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<GraphParam>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn column(mut self, key: &'static str, kind: ColumnKind) -> Self {
        self.columns.push((key, kind));
        self
    }

    pub fn get_param(&self, key: &str) -> Option<&GraphParam> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn int_param(&self, key: &str) -> Option<i64> {
        match self.get_param(key)? {
            GraphParam::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn text_param(&self, key: &str) -> Option<&str> {
        match self.get_param(key)? {
            GraphParam::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn int_list_param(&self, key: &str) -> Option<&[i64]> {
        match self.get_param(key)? {
            GraphParam::IntList(v) => Some(v),
            _ => None,
        }
    }
}

/// A single field value of a graph record.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl From<i64> for GraphValue {
    fn from(v: i64) -> Self {
        GraphValue::Int(v)
    }
}

impl From<f64> for GraphValue {
    fn from(v: f64) -> Self {
        GraphValue::Float(v)
    }
}

impl From<&str> for GraphValue {
    fn from(v: &str) -> Self {
        GraphValue::Text(v.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(v: String) -> Self {
        GraphValue::Text(v)
    }
}

impl<T: Into<GraphValue>> From<Option<T>> for GraphValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(GraphValue::Null)
    }
}

/// One row of a pattern-query result with named-field access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphRecord {
    fields: HashMap<String, GraphValue>,
}

impl GraphRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<GraphValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<GraphValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&GraphValue> {
        self.fields.get(key)
    }

    /// Integer field. Missing or null is a query failure.
    pub fn int(&self, key: &str) -> Result<i64> {
        match self.get(key) {
            Some(GraphValue::Int(v)) => Ok(*v),
            other => Err(unexpected(key, "integer", other)),
        }
    }

    /// Float field, widening integers.
    pub fn float(&self, key: &str) -> Result<f64> {
        self.opt_float(key)
            .ok_or_else(|| unexpected(key, "float", self.get(key)))
    }

    pub fn opt_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            GraphValue::Float(v) => Some(*v),
            GraphValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Result<String> {
        self.opt_text(key)
            .ok_or_else(|| unexpected(key, "string", self.get(key)))
    }

    pub fn opt_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            GraphValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

fn unexpected(key: &str, expected: &str, found: Option<&GraphValue>) -> FederationError {
    let found = match found {
        None => "nothing".to_string(),
        Some(v) => format!("{v:?}"),
    };
    FederationError::QueryFailed(format!("field '{key}': expected {expected}, found {found}"))
}
