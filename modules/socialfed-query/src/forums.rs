use tracing::debug;

use socialfed_common::error::{FederationError, Result};
use socialfed_common::ids::{doc_ids, to_doc, to_wire};
use socialfed_common::{EmptyReason, ForumSummary, Lookup};
use socialfed_docstore::Filter;
use socialfed_graph::{ColumnKind, GraphQuery};

use crate::collections::{FORUM_CONTAINER_POST, POST};
use crate::geo::distinct;
use crate::Federation;

const FORUMS_BY_IDS: &str = "MATCH (forum:Forum)
     WHERE forum.id IN $forumIds
     RETURN forum.id AS id, forum.title AS title";

impl Federation {
    /// Forums containing at least one post written in `language`.
    ///
    /// Posts and the post → forum table live in the document store; titles
    /// come from the graph store in one batched lookup.
    pub async fn forums_for_language(&self, language: &str) -> Result<Lookup<ForumSummary>> {
        if language.trim().is_empty() {
            return Err(FederationError::invalid("Language is required"));
        }

        let posts = self
            .docs
            .find(POST, &Filter::new().eq("language", language), Some(&["id"][..]))
            .await?;
        let post_ids = doc_ids(&posts, "id");
        if post_ids.is_empty() {
            return Ok(Lookup::Empty(EmptyReason::NoPosts));
        }

        let containers = self
            .docs
            .find(
                FORUM_CONTAINER_POST,
                &Filter::new().is_in("postId", post_ids.iter().map(|id| to_doc(*id))),
                Some(&["forumId"][..]),
            )
            .await?;
        let forum_ids = distinct(doc_ids(&containers, "forumId"));
        if forum_ids.is_empty() {
            return Ok(Lookup::Empty(EmptyReason::NoForums));
        }
        debug!(language, posts = post_ids.len(), forums = forum_ids.len(), "joined posts to forums");

        let q = GraphQuery::new("forums_by_ids", FORUMS_BY_IDS)
            .param("forumIds", forum_ids)
            .column("id", ColumnKind::Int)
            .column("title", ColumnKind::Text);

        let forums = self
            .graph
            .run(&q)
            .await?
            .iter()
            .map(|row| {
                Ok(ForumSummary {
                    id: to_wire(row.int("id")?),
                    title: row.opt_text("title"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Lookup::Found(forums))
    }
}
