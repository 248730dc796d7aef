//! Endpoint tests. The router is driven in-process via `tower::ServiceExt`
//! with in-memory stores behind the federation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use socialfed_api::{build_router, AppState};
use socialfed_common::error::Result;
use socialfed_common::FederationError;
use socialfed_docstore::testutil::MemoryDocumentStore;
use socialfed_graph::testutil::ScriptedGraphStore;
use socialfed_graph::{GraphQuery, GraphRecord, GraphStore};
use socialfed_query::Federation;

fn person(id: i64, first: &str, last: &str) -> GraphRecord {
    GraphRecord::new()
        .with("id", id)
        .with("firstName", first)
        .with("lastName", last)
}

fn italy_docs() -> MemoryDocumentStore {
    MemoryDocumentStore::new()
        .with("Place", vec![json!({"id": 1, "name": "Italy", "type": "country"})])
        .with(
            "PlaceIsPartOfPlace",
            vec![
                json!({"placeFrom": 1, "placeTo": 10}),
                json!({"placeFrom": 1, "placeTo": 11}),
            ],
        )
        .with(
            "IsLocatedInPlace",
            vec![
                json!({"personId": 100, "placeId": 10}),
                json!({"personId": 101, "placeId": 10}),
            ],
        )
}

fn people_graph() -> ScriptedGraphStore {
    ScriptedGraphStore::new().on_fn("people_by_ids", |q| {
        let wanted = q.int_list_param("personIds").unwrap_or(&[]).to_vec();
        Ok([person(100, "Marco", "Rossi"), person(101, "Giulia", "Bianchi")]
            .into_iter()
            .filter(|p| wanted.contains(&p.int("id").unwrap()))
            .collect())
    })
}

fn app(docs: MemoryDocumentStore, graph: ScriptedGraphStore) -> axum::Router {
    let federation = Federation::new(Arc::new(docs), Arc::new(graph));
    build_router(Arc::new(AppState { federation }))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn liveness_route_answers_ok() {
    let response = app(MemoryDocumentStore::new(), ScriptedGraphStore::new())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn location_lookup_returns_people_and_summary() {
    let (status, body) = get(
        app(italy_docs(), people_graph()),
        "/api/queryLookUp1?type=country&name=Italy",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "location": {"type": "country", "name": "Italy", "totalPeople": 2},
            "people": [
                {"id": "100", "firstName": "Marco", "lastName": "Rossi"},
                {"id": "101", "firstName": "Giulia", "lastName": "Bianchi"}
            ]
        })
    );
}

#[tokio::test]
async fn location_lookup_for_unknown_place_has_a_message() {
    let (status, body) = get(
        app(italy_docs(), people_graph()),
        "/api/queryLookUp1?type=city&name=Atlantis",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "No locations found matching the criteria", "people": []})
    );
}

#[tokio::test]
async fn location_lookup_requires_both_params() {
    let (status, body) = get(
        app(italy_docs(), people_graph()),
        "/api/queryLookUp1?type=country",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Both type and name are required"}));
}

#[tokio::test]
async fn location_lookup_rejects_unknown_type() {
    let (status, body) = get(
        app(italy_docs(), people_graph()),
        "/api/queryLookUp1?type=galaxy&name=Andromeda",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Location type must be city, country, or continent"})
    );
}

#[tokio::test]
async fn tag_lookup_requires_tag_name() {
    let (status, body) = get(
        app(MemoryDocumentStore::new(), ScriptedGraphStore::new()),
        "/api/queryLookUp2",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Tag name is required"}));
}

#[tokio::test]
async fn tag_lookup_store_failure_is_a_server_error() {
    let graph = ScriptedGraphStore::new().on_fn("people_who_liked_tag", |_| {
        Err(FederationError::QueryFailed("Neo.ClientError.Statement.SyntaxError".into()))
    });
    let (status, body) = get(
        app(MemoryDocumentStore::new(), graph),
        "/api/queryLookUp2?tagName=Mozart",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Neo.ClientError.Statement.SyntaxError"));
}

#[tokio::test]
async fn language_lookup_without_posts_has_a_message() {
    let docs = MemoryDocumentStore::new().with("Post", vec![json!({"id": 1, "language": "it"})]);
    let (status, body) = get(
        app(docs, ScriptedGraphStore::new()),
        "/api/queryLookUp3?language=xx",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "No posts found in this language", "forums": []})
    );
}

#[tokio::test]
async fn university_likes_are_wrapped() {
    let graph = ScriptedGraphStore::new().on(
        "university_likes",
        vec![GraphRecord::new()
            .with("universityId", 2001_i64)
            .with("likeCount", 4_i64)],
    );
    let (status, body) = get(app(MemoryDocumentStore::new(), graph), "/api/queryAnalitica1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count_like_with_names": [
            {"universityId": "2001", "likes": 4, "universityName": "Unknown"}
        ]})
    );
}

#[tokio::test]
async fn moderator_failures_stay_inside_the_payload() {
    let graph = ScriptedGraphStore::new()
        .on(
            "moderators",
            vec![GraphRecord::new().with("name", "Ada").with("id", 1_i64)],
        )
        .on_fn("acquaintance_age", |_| {
            Err(FederationError::QueryFailed("boom".into()))
        });
    let (status, body) = get(app(MemoryDocumentStore::new(), graph), "/api/queryAnalitica2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"mods": [
            {"name": "Ada", "id": "1", "averageAgeOfKnownPeople": "Error", "numberOfKnownPeople": 0}
        ]})
    );
}

#[tokio::test]
async fn gender_dominance_is_wrapped_in_tags() {
    let graph = ScriptedGraphStore::new().on(
        "interest_gender_counts",
        vec![
            GraphRecord::new().with("tagName", "Mozart").with("gender", "male").with("count", 3_i64),
            GraphRecord::new().with("tagName", "Mozart").with("gender", "female").with("count", 1_i64),
        ],
    );
    let (status, body) = get(app(MemoryDocumentStore::new(), graph), "/api/queryAnalitica3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"tags": [
            {"tagName": "Mozart", "mostCommonGender": "male", "count": 3, "dominanceRatio": 0.75}
        ]})
    );
}

#[tokio::test]
async fn health_reports_both_stores() {
    let (status, body) = get(
        app(MemoryDocumentStore::new(), ScriptedGraphStore::new()),
        "/health",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"documentStore": "ok", "graphStore": "ok"}));
}

struct UnreachableGraph;

#[async_trait::async_trait]
impl GraphStore for UnreachableGraph {
    async fn run(&self, _query: &GraphQuery) -> Result<Vec<GraphRecord>> {
        Err(FederationError::StoreUnavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<()> {
        Err(FederationError::StoreUnavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn health_is_unavailable_when_a_store_is_down() {
    let federation = Federation::new(Arc::new(MemoryDocumentStore::new()), Arc::new(UnreachableGraph));
    let (status, body) = get(build_router(Arc::new(AppState { federation })), "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["documentStore"], "ok");
    assert!(body["graphStore"].as_str().unwrap().contains("connection refused"));
}
