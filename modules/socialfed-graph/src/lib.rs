pub mod client;
pub mod query;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod testutil;

pub use client::GraphClient;
pub use query::{ColumnKind, GraphParam, GraphQuery, GraphRecord, GraphValue};
pub use store::GraphStore;
