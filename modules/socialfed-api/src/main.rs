use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use socialfed_api::{build_router, AppState};
use socialfed_common::Config;
use socialfed_docstore::MongoStore;
use socialfed_graph::GraphClient;
use socialfed_query::Federation;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("socialfed=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let graph =
        GraphClient::connect(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
            .await?;
    match graph.ping().await {
        Ok(()) => info!(uri = %config.neo4j_uri, "Connected to Neo4j"),
        Err(e) => warn!(error = %e, "Neo4j not reachable at startup"),
    }

    let docs = MongoStore::connect(&config.mongo_uri, &config.mongo_database).await?;
    match docs.ping().await {
        Ok(()) => info!(database = %config.mongo_database, "Connected to MongoDB"),
        Err(e) => warn!(error = %e, "MongoDB not reachable at startup"),
    }

    let federation = Federation::new(Arc::new(docs), Arc::new(graph))
        .with_moderator_fanout(config.moderator_fanout);
    let app = build_router(Arc::new(AppState { federation }));

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Social federation API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
