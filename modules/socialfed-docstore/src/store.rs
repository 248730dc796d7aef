use async_trait::async_trait;
use serde_json::{Map, Value};

use socialfed_common::error::Result;

use crate::filter::Filter;

/// A record from a document collection.
pub type Document = Map<String, Value>;

/// Read access to the document store, collection by collection.
///
/// Implementations return documents in the store's native order and must be
/// safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in `collection` matching `filter`. With a projection,
    /// only the listed fields are guaranteed to be present.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>>;

    /// First document in `collection` matching `filter`, if any.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        Ok(self.find(collection, filter, None).await?.into_iter().next())
    }

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
