use async_trait::async_trait;

use socialfed_common::error::Result;

use crate::query::{GraphQuery, GraphRecord};

/// Executes parametrized pattern queries against the graph store.
///
/// Records come back in the store's native order. Implementations are
/// shared between concurrent requests.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn run(&self, query: &GraphQuery) -> Result<Vec<GraphRecord>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
