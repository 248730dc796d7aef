//! In-memory document store for tests.
//!
//! Collections are plain vectors evaluated with the same `Filter` semantics
//! the MongoDB adapter translates. Every `find` is recorded so tests can
//! assert which lookups were (or were not) issued.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use socialfed_common::error::{FederationError, Result};

use crate::filter::Filter;
use crate::store::{Document, DocumentStore};

/// One recorded `find`.
#[derive(Debug, Clone, PartialEq)]
pub struct FindCall {
    pub collection: String,
    pub filter: Filter,
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: HashMap<String, Vec<Document>>,
    failing: HashMap<String, String>,
    calls: Mutex<Vec<FindCall>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents to `collection`. Each value must be a JSON object.
    pub fn with(mut self, collection: &str, docs: impl IntoIterator<Item = Value>) -> Self {
        let entry = self.collections.entry(collection.to_string()).or_default();
        entry.extend(docs.into_iter().filter_map(|d| match d {
            Value::Object(map) => Some(map),
            _ => None,
        }));
        self
    }

    /// Make every lookup against `collection` fail with `message`.
    pub fn failing(mut self, collection: &str, message: &str) -> Self {
        self.failing
            .insert(collection.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<FindCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, collection: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.collection == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>> {
        self.calls.lock().unwrap().push(FindCall {
            collection: collection.to_string(),
            filter: filter.clone(),
        });

        if let Some(message) = self.failing.get(collection) {
            return Err(FederationError::QueryFailed(message.clone()));
        }

        let rows = self
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect::<Vec<_>>())
            .unwrap_or_default();

        Ok(match projection {
            Some(fields) => rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .filter(|(k, _)| fields.contains(&k.as_str()))
                        .collect()
                })
                .collect(),
            None => rows,
        })
    }
}
