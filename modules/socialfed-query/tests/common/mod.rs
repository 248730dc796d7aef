//! Shared fixtures: a small slice of the social network split across an
//! in-memory document store and a scripted graph store.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use socialfed_docstore::testutil::MemoryDocumentStore;
use socialfed_graph::testutil::ScriptedGraphStore;
use socialfed_graph::GraphRecord;
use socialfed_query::Federation;

/// Europe(5) ⊇ {Italy(1), France(2)}; Italy ⊇ {Rome(10), Milan(11)}; France ⊇ {Paris(20)}.
pub fn places() -> MemoryDocumentStore {
    MemoryDocumentStore::new()
        .with(
            "Place",
            vec![
                json!({"id": 5, "name": "Europe", "type": "continent"}),
                json!({"id": 1, "name": "Italy", "type": "country"}),
                json!({"id": 2, "name": "France", "type": "country"}),
                json!({"id": 10, "name": "Rome", "type": "city"}),
                json!({"id": 11, "name": "Milan", "type": "city"}),
                json!({"id": 20, "name": "Paris", "type": "city"}),
            ],
        )
        .with(
            "PlaceIsPartOfPlace",
            vec![
                json!({"placeFrom": 5, "placeTo": 1}),
                json!({"placeFrom": 5, "placeTo": 2}),
                json!({"placeFrom": 1, "placeTo": 10}),
                json!({"placeFrom": 1, "placeTo": 11}),
                json!({"placeFrom": 2, "placeTo": 20}),
            ],
        )
}

pub fn person(id: i64, first: &str, last: &str) -> GraphRecord {
    GraphRecord::new()
        .with("id", id)
        .with("firstName", first)
        .with("lastName", last)
}

/// Graph store whose `people_by_ids` answers from `people`, in table order,
/// keeping only the requested ids.
pub fn people_graph(people: Vec<GraphRecord>) -> ScriptedGraphStore {
    ScriptedGraphStore::new().on_fn("people_by_ids", move |q| {
        let wanted = q.int_list_param("personIds").unwrap_or(&[]).to_vec();
        Ok(people
            .iter()
            .filter(|p| p.int("id").map(|id| wanted.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    })
}

pub fn federation(
    docs: MemoryDocumentStore,
    graph: ScriptedGraphStore,
) -> (Federation, Arc<MemoryDocumentStore>, Arc<ScriptedGraphStore>) {
    let docs = Arc::new(docs);
    let graph = Arc::new(graph);
    let fed = Federation::new(docs.clone(), graph.clone());
    (fed, docs, graph)
}
