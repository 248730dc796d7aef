use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use socialfed_common::{FederationError, LocationSummary, Lookup};

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct LocationQuery {
    #[serde(rename = "type")]
    place_type: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct TagQuery {
    #[serde(rename = "tagName")]
    tag_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LanguageQuery {
    language: Option<String>,
}

// --- Helpers ---

/// Present and not just whitespace.
fn given(param: Option<String>) -> Option<String> {
    param.filter(|p| !p.trim().is_empty())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// 400 for invalid input, 500 for anything the stores did.
fn error_response(endpoint: &str, e: FederationError) -> Response {
    if e.is_client_error() {
        return bad_request(&e.to_string());
    }
    warn!(endpoint, error = %e, "Federated query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

// --- Handlers ---

pub async fn api_people_by_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationQuery>,
) -> Response {
    let (Some(place_type), Some(name)) = (given(params.place_type), given(params.name)) else {
        return bad_request("Both type and name are required");
    };

    match state.federation.people_in_scope(&place_type, &name).await {
        Ok(Lookup::Found(people)) => {
            let location = LocationSummary {
                place_type,
                name,
                total_people: people.len(),
            };
            Json(json!({ "location": location, "people": people })).into_response()
        }
        Ok(Lookup::Empty(reason)) => {
            Json(json!({ "message": reason.message(), "people": [] })).into_response()
        }
        Err(e) => error_response("people-by-location", e),
    }
}

pub async fn api_people_by_comment_tag(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TagQuery>,
) -> Response {
    let Some(tag_name) = given(params.tag_name) else {
        return bad_request("Tag name is required");
    };

    match state.federation.people_who_liked_tag(&tag_name).await {
        Ok(people) => Json(json!({ "people": people })).into_response(),
        Err(e) => error_response("people-by-comment-tag", e),
    }
}

pub async fn api_forums_by_post_language(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageQuery>,
) -> Response {
    let Some(language) = given(params.language) else {
        return bad_request("Language is required");
    };

    match state.federation.forums_for_language(&language).await {
        Ok(Lookup::Found(forums)) => Json(json!({ "forums": forums })).into_response(),
        Ok(Lookup::Empty(reason)) => {
            Json(json!({ "message": reason.message(), "forums": [] })).into_response()
        }
        Err(e) => error_response("forums-by-post-language", e),
    }
}

pub async fn api_university_likes(State(state): State<Arc<AppState>>) -> Response {
    match state.federation.university_like_counts().await {
        Ok(rows) => Json(json!({ "count_like_with_names": rows })).into_response(),
        Err(e) => error_response("university-likes", e),
    }
}

pub async fn api_moderator_acquaintance_age(State(state): State<Arc<AppState>>) -> Response {
    match state.federation.moderators_with_acquaintance_age().await {
        Ok(mods) => Json(json!({ "mods": mods })).into_response(),
        Err(e) => error_response("moderator-acquaintance-age", e),
    }
}

pub async fn api_tag_gender_dominance(State(state): State<Arc<AppState>>) -> Response {
    match state.federation.gender_dominance_by_tag().await {
        Ok(tags) => Json(json!({ "tags": tags })).into_response(),
        Err(e) => error_response("tag-gender-dominance", e),
    }
}

/// Pings both stores. 503 when either is unreachable.
pub async fn api_health(State(state): State<Arc<AppState>>) -> Response {
    let (docs, graph) = state.federation.ping().await;
    let status = |r: &Result<(), FederationError>| match r {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    };
    let body = Json(json!({
        "documentStore": status(&docs),
        "graphStore": status(&graph),
    }));

    if docs.is_ok() && graph.is_ok() {
        body.into_response()
    } else {
        warn!(document_store = %status(&docs), graph_store = %status(&graph), "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    }
}
