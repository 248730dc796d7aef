use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::error::ErrorKind;
use mongodb::{Client, Database};
use serde_json::Value;
use tracing::debug;

use socialfed_common::error::{FederationError, Result};

use crate::filter::{Condition, Filter};
use crate::store::{Document, DocumentStore};

/// Thin wrapper around a MongoDB database providing connection setup.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Build a client for `uri` and bind it to `database`. The driver
    /// connects lazily; call `ping` to fail fast.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| FederationError::StoreUnavailable(e.to_string()))?;
        Ok(Self {
            db: client.database(database),
        })
    }

    pub async fn ping(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: Option<&[&str]>,
    ) -> Result<Vec<Document>> {
        let coll = self.db.collection::<BsonDocument>(collection);
        let filter_doc = to_bson_filter(filter)?;
        debug!(collection, filter = %filter_doc, "document find");

        let mut find = coll.find(filter_doc);
        if let Some(fields) = projection {
            find = find.projection(to_projection(fields));
        }
        let cursor = find.await.map_err(store_error)?;
        let rows: Vec<BsonDocument> = cursor.try_collect().await.map_err(store_error)?;

        Ok(rows.into_iter().filter_map(to_document).collect())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let coll = self.db.collection::<BsonDocument>(collection);
        let row = coll
            .find_one(to_bson_filter(filter)?)
            .await
            .map_err(store_error)?;
        Ok(row.and_then(to_document))
    }

    async fn ping(&self) -> Result<()> {
        MongoStore::ping(self).await
    }
}

fn store_error(e: mongodb::error::Error) -> FederationError {
    match *e.kind {
        ErrorKind::ServerSelection { .. } => FederationError::StoreUnavailable(e.to_string()),
        _ => FederationError::QueryFailed(e.to_string()),
    }
}

fn to_bson_filter(filter: &Filter) -> Result<BsonDocument> {
    let mut out = BsonDocument::new();
    for (field, condition) in filter.clauses() {
        let value = match condition {
            Condition::Eq(v) => to_bson_value(v)?,
            Condition::In(values) => {
                let members = values.iter().map(to_bson_value).collect::<Result<Vec<_>>>()?;
                Bson::Document(doc! { "$in": members })
            }
        };
        out.insert(field.clone(), value);
    }
    Ok(out)
}

fn to_bson_value(value: &Value) -> Result<Bson> {
    bson::to_bson(value).map_err(|e| FederationError::invalid(format!("unsupported filter value: {e}")))
}

fn to_projection(fields: &[&str]) -> BsonDocument {
    fields.iter().map(|f| (f.to_string(), Bson::Int32(1))).collect()
}

/// Relaxed extended JSON keeps integers as plain JSON numbers.
fn to_document(row: BsonDocument) -> Option<Document> {
    match Bson::Document(row).into_relaxed_extjson() {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
