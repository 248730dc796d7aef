use std::sync::Arc;

use socialfed_common::error::Result;
use socialfed_docstore::DocumentStore;
use socialfed_graph::GraphStore;

/// The two store handles every federated operation works against.
///
/// Handles are long-lived and shared; a `Federation` holds no other state,
/// so one instance serves any number of concurrent requests.
#[derive(Clone)]
pub struct Federation {
    pub(crate) docs: Arc<dyn DocumentStore>,
    pub(crate) graph: Arc<dyn GraphStore>,
    pub(crate) moderator_fanout: usize,
}

impl Federation {
    pub fn new(docs: Arc<dyn DocumentStore>, graph: Arc<dyn GraphStore>) -> Self {
        Self {
            docs,
            graph,
            moderator_fanout: 1,
        }
    }

    /// Bound the number of per-moderator sub-queries in flight at once.
    /// 1 (the default) runs them one after another.
    pub fn with_moderator_fanout(mut self, fanout: usize) -> Self {
        self.moderator_fanout = fanout.max(1);
        self
    }

    /// Reachability of (document store, graph store).
    pub async fn ping(&self) -> (Result<()>, Result<()>) {
        futures::join!(self.docs.ping(), self.graph.ping())
    }
}
