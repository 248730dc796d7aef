pub mod filter;
pub mod mongo;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod testutil;

pub use filter::{Condition, Filter};
pub use mongo::MongoStore;
pub use store::{Document, DocumentStore};
