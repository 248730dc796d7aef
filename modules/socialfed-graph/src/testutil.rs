//! Test utilities: a scripted in-memory graph store, and (with the
//! `test-utils` feature) a real Neo4j instance via testcontainers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use socialfed_common::error::{FederationError, Result};

use crate::query::{GraphQuery, GraphRecord};
use crate::store::GraphStore;

type Responder = Box<dyn Fn(&GraphQuery) -> Result<Vec<GraphRecord>> + Send + Sync>;

/// Graph store that answers by query name.
/// Builder pattern: `.on()` for canned rows, `.on_fn()` for answers that
/// depend on the query's parameters. Unregistered names are an error.
#[derive(Default)]
pub struct ScriptedGraphStore {
    responders: HashMap<&'static str, Responder>,
    calls: Mutex<Vec<GraphQuery>>,
}

impl ScriptedGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, name: &'static str, rows: Vec<GraphRecord>) -> Self {
        self.on_fn(name, move |_| Ok(rows.clone()))
    }

    pub fn on_fn<F>(mut self, name: &'static str, responder: F) -> Self
    where
        F: Fn(&GraphQuery) -> Result<Vec<GraphRecord>> + Send + Sync + 'static,
    {
        self.responders.insert(name, Box::new(responder));
        self
    }

    pub fn calls(&self) -> Vec<GraphQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.name == name)
            .count()
    }
}

#[async_trait]
impl GraphStore for ScriptedGraphStore {
    async fn run(&self, query: &GraphQuery) -> Result<Vec<GraphRecord>> {
        self.calls.lock().unwrap().push(query.clone());
        match self.responders.get(query.name) {
            Some(responder) => responder(query),
            None => Err(FederationError::QueryFailed(format!(
                "ScriptedGraphStore: no answer registered for {}",
                query.name
            ))),
        }
    }
}

#[cfg(feature = "test-utils")]
pub use container::neo4j_container;

#[cfg(feature = "test-utils")]
mod container {
    use testcontainers::{
        core::{ContainerPort, WaitFor},
        runners::AsyncRunner,
        ContainerAsync, GenericImage, ImageExt,
    };

    use crate::GraphClient;

    /// Spin up a Neo4j container and return the container handle + connected GraphClient.
    ///
    /// The container is dropped (and stopped) when `ContainerAsync` goes out of scope,
    /// so callers must hold it alive for the duration of the test.
    pub async fn neo4j_container() -> (ContainerAsync<GenericImage>, GraphClient) {
        let image = GenericImage::new("neo4j", "5.25.1")
            .with_exposed_port(ContainerPort::Tcp(7687))
            .with_wait_for(WaitFor::message_on_stdout("Started."))
            .with_env_var("NEO4J_AUTH", "neo4j/testpassword");

        let container: ContainerAsync<GenericImage> = image
            .start()
            .await
            .expect("Failed to start Neo4j container");

        let host_port = container
            .get_host_port_ipv4(7687)
            .await
            .expect("Failed to get Neo4j host port");

        let uri = format!("bolt://127.0.0.1:{host_port}");
        let client = GraphClient::connect(&uri, "neo4j", "testpassword")
            .await
            .expect("Failed to connect to Neo4j");

        (container, client)
    }
}
