//! Live tests against Neo4j.
//! Run with: cargo test -p socialfed-graph --features test-utils --test graph_connect -- --ignored

#![cfg(feature = "test-utils")]

use socialfed_graph::testutil::neo4j_container;
use socialfed_graph::{ColumnKind, GraphClient, GraphQuery, GraphStore, GraphValue};

#[tokio::test]
#[ignore] // requires live Neo4j credentials
async fn cloud_connect() {
    let uri = std::env::var("NEO4J_URI").expect("NEO4J_URI required");
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".into());
    let password = std::env::var("NEO4J_PASSWORD").expect("NEO4J_PASSWORD required");

    let client = GraphClient::connect(&uri, &user, &password)
        .await
        .expect("Failed to connect");
    client.ping().await.expect("Failed to ping");
}

#[tokio::test]
#[ignore] // starts a Docker container
async fn typed_columns_round_trip_through_bolt() {
    let (_container, client) = neo4j_container().await;

    let q = GraphQuery::new(
        "typed_columns",
        "UNWIND $ids AS id
         RETURN id, toString(id) AS label, toFloat(id) / 2 AS half, null AS missing
         ORDER BY id",
    )
    .param("ids", vec![3_i64, 1, 2])
    .column("id", ColumnKind::Int)
    .column("label", ColumnKind::Text)
    .column("half", ColumnKind::Float)
    .column("missing", ColumnKind::Text);

    let rows = client.run(&q).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].int("id").unwrap(), 1);
    assert_eq!(rows[0].text("label").unwrap(), "1");
    assert_eq!(rows[2].float("half").unwrap(), 1.5);
    assert_eq!(rows[0].get("missing"), Some(&GraphValue::Null));
}
