use socialfed_common::error::{FederationError, Result};
use socialfed_common::PersonSummary;
use socialfed_graph::{ColumnKind, GraphQuery};

use crate::geo::row_to_person;
use crate::Federation;

const PEOPLE_WHO_LIKED_TAG: &str =
    "MATCH (person:Person)-[:LIKES_COMMENT]->(comment:Comment)-[:TAGGED]->(tag:Tag {name: $tagName})
     RETURN person.id AS id, person.firstName AS firstName, person.lastName AS lastName";

impl Federation {
    /// Persons who liked a comment tagged `tag_name`. Graph store only.
    /// A person appears once per liked comment, as the pattern match yields them.
    pub async fn people_who_liked_tag(&self, tag_name: &str) -> Result<Vec<PersonSummary>> {
        if tag_name.trim().is_empty() {
            return Err(FederationError::invalid("Tag name is required"));
        }

        let q = GraphQuery::new("people_who_liked_tag", PEOPLE_WHO_LIKED_TAG)
            .param("tagName", tag_name)
            .column("id", ColumnKind::Int)
            .column("firstName", ColumnKind::Text)
            .column("lastName", ColumnKind::Text);

        let rows = self.graph.run(&q).await?;
        rows.iter().map(row_to_person).collect()
    }
}
