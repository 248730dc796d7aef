pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use config::Config;
pub use error::FederationError;
pub use types::*;
