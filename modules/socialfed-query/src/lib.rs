//! Cross-store query federation over the social network dataset.
//!
//! Places, posts, organisations and containment tables live in the document
//! store; persons, comments, tags and forums live in the graph store. Each
//! operation on [`Federation`] resolves entity sets in one store and turns
//! them into filters for the other.

pub mod collections;
pub mod federation;
pub mod forums;
pub mod geo;
pub mod interests;
pub mod moderators;
pub mod tags;
pub mod universities;

pub use federation::Federation;
pub use interests::{dominance_by_tag, GenderCount};
