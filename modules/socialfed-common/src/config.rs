use std::env;

use crate::error::{FederationError, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Neo4j
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,

    // MongoDB
    pub mongo_uri: String,
    pub mongo_database: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    /// Max in-flight per-moderator sub-queries. 1 keeps them sequential.
    pub moderator_fanout: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Only the Neo4j password is required; everything else has a local default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let moderator_fanout: usize = parse_var("MODERATOR_FANOUT", &or_default("MODERATOR_FANOUT", "1"))?;
        if moderator_fanout == 0 {
            return Err(FederationError::Config(
                "MODERATOR_FANOUT must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            neo4j_uri: or_default("NEO4J_URI", "bolt://localhost:7687"),
            neo4j_user: or_default("NEO4J_USER", "neo4j"),
            neo4j_password: lookup("NEO4J_PASSWORD").ok_or_else(|| {
                FederationError::Config("NEO4J_PASSWORD environment variable is required".to_string())
            })?,
            mongo_uri: or_default("MONGO_URI", "mongodb://localhost:27017"),
            mongo_database: or_default("MONGO_DATABASE", "MAADB"),
            web_host: or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_var("WEB_PORT", &or_default("WEB_PORT", "3000"))?,
            moderator_fanout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| FederationError::Config(format!("{key} must be a number, got '{raw}'")))
}
