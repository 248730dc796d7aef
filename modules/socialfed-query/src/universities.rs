use std::collections::HashMap;

use socialfed_common::error::Result;
use socialfed_common::ids::{doc_id, to_doc, to_wire};
use socialfed_common::{UniversityLikes, UNKNOWN_UNIVERSITY};
use socialfed_docstore::Filter;
use socialfed_graph::{ColumnKind, GraphQuery};

use crate::collections::ORGANISATION;
use crate::Federation;

// Every (creator, post, liker) match where both study at the same university
// counts once. Creator and liker may be the same person.
const UNIVERSITY_LIKES: &str =
    "MATCH (creator:Person)-[:HAS_CREATOR_POST]-(post:Post)-[:LIKES_POST]-(liker:Person),
           (creator)-[:STUDY_AT]-(university:University),
           (liker)-[:STUDY_AT]-(university)
     WITH university.id AS universityId, count(liker) AS likeCount
     RETURN universityId, likeCount
     ORDER BY likeCount DESC";

impl Federation {
    /// Likes exchanged between members of the same university, per university,
    /// most liked first. Names come from the document store; a university
    /// without an organisation record is reported as "Unknown".
    pub async fn university_like_counts(&self) -> Result<Vec<UniversityLikes>> {
        let q = GraphQuery::new("university_likes", UNIVERSITY_LIKES)
            .column("universityId", ColumnKind::Int)
            .column("likeCount", ColumnKind::Int);

        let counts = self
            .graph
            .run(&q)
            .await?
            .iter()
            .map(|row| Ok((row.int("universityId")?, row.int("likeCount")?)))
            .collect::<Result<Vec<(i64, i64)>>>()?;
        if counts.is_empty() {
            return Ok(Vec::new());
        }

        let organisations = self
            .docs
            .find(
                ORGANISATION,
                &Filter::new().is_in("id", counts.iter().map(|(id, _)| to_doc(*id))),
                Some(&["id", "name"][..]),
            )
            .await?;

        let mut names: HashMap<i64, String> = HashMap::new();
        for org in &organisations {
            let (Some(id), Some(name)) = (
                org.get("id").and_then(doc_id),
                org.get("name")
                    .and_then(|n| n.as_str())
                    .filter(|n| !n.is_empty()),
            ) else {
                continue;
            };
            names.entry(id).or_insert_with(|| name.to_string());
        }

        let mut rows: Vec<UniversityLikes> = counts
            .into_iter()
            .map(|(id, likes)| UniversityLikes {
                university_id: to_wire(id),
                likes,
                university_name: names
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_UNIVERSITY.to_string()),
            })
            .collect();
        rows.sort_by(|a, b| b.likes.cmp(&a.likes));
        Ok(rows)
    }
}
