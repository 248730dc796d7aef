use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use socialfed_common::error::Result;
use socialfed_common::ids::to_wire;
use socialfed_common::{AcquaintanceAge, ModeratorAcquaintanceAge};
use socialfed_graph::{ColumnKind, GraphQuery, GraphRecord};

use crate::Federation;

const MODERATORS: &str = "MATCH (forum:Forum)-[:MODERATOR]->(person:Person)
     RETURN DISTINCT person.firstName AS name, person.id AS id";

const ACQUAINTANCE_AGE: &str =
    "MATCH (person:Person {id: $idMod})-[:KNOWS]->(knownPerson:Person)
     WHERE knownPerson.birthday IS NOT NULL
     WITH knownPerson,
          duration.between(datetime(knownPerson.birthday), datetime()).years AS knownPersonAge
     RETURN avg(knownPersonAge) AS averageAge, count(knownPerson) AS knownCount";

impl Federation {
    /// Every forum moderator with the average age (whole years, as of now) of
    /// the people they know.
    ///
    /// Issues one moderator query plus one acquaintance query per moderator,
    /// so O(moderators) round trips. Sub-queries run `moderator_fanout` at a
    /// time (sequentially by default) and results keep the moderator order.
    /// A failing sub-query marks only that moderator as "Error".
    pub async fn moderators_with_acquaintance_age(&self) -> Result<Vec<ModeratorAcquaintanceAge>> {
        let q = GraphQuery::new("moderators", MODERATORS)
            .column("name", ColumnKind::Text)
            .column("id", ColumnKind::Int);
        let moderators = self
            .graph
            .run(&q)
            .await?
            .iter()
            .map(|row| Ok((row.opt_text("name").unwrap_or_default(), row.int("id")?)))
            .collect::<Result<Vec<(String, i64)>>>()?;
        debug!(moderators = moderators.len(), fanout = self.moderator_fanout, "computing acquaintance ages");

        let results = stream::iter(moderators.into_iter().map(|(name, id)| async move {
            let outcome = self.acquaintance_age(id).await;
            ModeratorAcquaintanceAge::new(name, to_wire(id), outcome)
        }))
        .buffered(self.moderator_fanout)
        .collect::<Vec<_>>()
        .await;

        Ok(results)
    }

    async fn acquaintance_age(&self, moderator_id: i64) -> AcquaintanceAge {
        let q = GraphQuery::new("acquaintance_age", ACQUAINTANCE_AGE)
            .param("idMod", moderator_id)
            .column("averageAge", ColumnKind::Float)
            .column("knownCount", ColumnKind::Int);

        match self.graph.run(&q).await {
            Ok(rows) => age_from_rows(&rows),
            Err(e) => {
                warn!(moderator_id, error = %e, "Acquaintance age sub-query failed");
                AcquaintanceAge::Failed
            }
        }
    }
}

/// The aggregate returns a single row; a null average means no acquaintance
/// had a birthday.
fn age_from_rows(rows: &[GraphRecord]) -> AcquaintanceAge {
    let Some(row) = rows.first() else {
        return AcquaintanceAge::NoData;
    };
    match (row.opt_float("averageAge"), row.int("knownCount")) {
        (Some(average_age), Ok(count)) if count > 0 => AcquaintanceAge::Known { average_age, count },
        _ => AcquaintanceAge::NoData,
    }
}
