use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Row};
use tracing::debug;

use socialfed_common::error::{FederationError, Result};

use crate::query::{ColumnKind, GraphParam, GraphQuery, GraphRecord, GraphValue};
use crate::store::GraphStore;

/// Thin wrapper around neo4rs::Graph providing connection setup.
#[derive(Clone)]
pub struct GraphClient {
    pub(crate) graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given credentials.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .fetch_size(500)
            .max_connections(10)
            .build()
            .map_err(|e| FederationError::Config(e.to_string()))?;
        let graph = Graph::connect(config)
            .await
            .map_err(|e| FederationError::StoreUnavailable(e.to_string()))?;
        Ok(Self { graph })
    }

    /// Round-trip a trivial query to prove the connection works.
    pub async fn ping(&self) -> Result<()> {
        let mut result = self
            .graph
            .execute(query("RETURN 1 AS ping"))
            .await
            .map_err(|e| FederationError::StoreUnavailable(e.to_string()))?;
        match result.next().await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(FederationError::StoreUnavailable(
                "ping returned no row".to_string(),
            )),
            Err(e) => Err(FederationError::StoreUnavailable(e.to_string())),
        }
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn run(&self, q: &GraphQuery) -> Result<Vec<GraphRecord>> {
        debug!(query = q.name, "graph run");

        let mut bolt = query(q.cypher);
        for (key, value) in &q.params {
            bolt = match value {
                GraphParam::Int(v) => bolt.param(key, *v),
                GraphParam::Text(v) => bolt.param(key, v.as_str()),
                GraphParam::IntList(v) => bolt.param(key, v.clone()),
            };
        }

        let mut records = Vec::new();
        let mut stream = self.graph.execute(bolt).await.map_err(query_failed)?;
        while let Some(row) = stream.next().await.map_err(query_failed)? {
            records.push(row_to_record(&row, &q.columns));
        }
        Ok(records)
    }

    async fn ping(&self) -> Result<()> {
        GraphClient::ping(self).await
    }
}

fn query_failed(e: neo4rs::Error) -> FederationError {
    FederationError::QueryFailed(e.to_string())
}

/// Read each declared column with its native type. Absent or null values
/// become `GraphValue::Null`; integer ids stored as strings are parsed.
fn row_to_record(row: &Row, columns: &[(&'static str, ColumnKind)]) -> GraphRecord {
    let mut record = GraphRecord::new();
    for (name, kind) in columns {
        let value = match kind {
            ColumnKind::Int => row
                .get::<i64>(name)
                .ok()
                .or_else(|| {
                    row.get::<String>(name)
                        .ok()
                        .and_then(|s| s.trim().parse().ok())
                })
                .map(GraphValue::Int),
            ColumnKind::Float => row
                .get::<f64>(name)
                .ok()
                .or_else(|| row.get::<i64>(name).ok().map(|v| v as f64))
                .map(GraphValue::Float),
            ColumnKind::Text => row.get::<String>(name).ok().map(GraphValue::Text),
        };
        record.insert(name, value.unwrap_or(GraphValue::Null));
    }
    record
}
