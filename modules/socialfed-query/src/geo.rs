//! Geographic scope resolution and the location → person join.

use std::collections::HashSet;

use tracing::debug;

use socialfed_common::error::{FederationError, Result};
use socialfed_common::ids::{doc_id, doc_ids, to_doc, to_wire};
use socialfed_common::{EmptyReason, Lookup, PersonSummary, PlaceType};
use socialfed_docstore::Filter;
use socialfed_graph::{ColumnKind, GraphQuery, GraphRecord};

use crate::collections::{IS_LOCATED_IN_PLACE, PLACE, PLACE_IS_PART_OF_PLACE};
use crate::Federation;

const PEOPLE_BY_IDS: &str = "MATCH (p:Person)
     WHERE p.id IN $personIds
     RETURN p.id AS id, p.firstName AS firstName, p.lastName AS lastName";

impl Federation {
    /// Expand a `{type, name}` locator into the city-level place ids it contains.
    ///
    /// - city: the place itself
    /// - country: its directly contained places
    /// - continent: the places contained in each of its countries, concatenated
    ///   in country order without deduplication
    ///
    /// An unknown place resolves to an empty list. An unsupported `place_type`
    /// is rejected before any store access.
    pub async fn resolve_scope(&self, place_type: &str, name: &str) -> Result<Vec<i64>> {
        let place_type: PlaceType = place_type.parse()?;
        if name.trim().is_empty() {
            return Err(FederationError::invalid("Both type and name are required"));
        }

        let Some(place_id) = self.find_place(place_type, name).await? else {
            debug!(%place_type, name, "place not found");
            return Ok(Vec::new());
        };

        let cities = match place_type {
            PlaceType::City => vec![place_id],
            PlaceType::Country => self.contained_places(place_id).await?,
            PlaceType::Continent => {
                let mut cities = Vec::new();
                for country in self.contained_places(place_id).await? {
                    cities.extend(self.contained_places(country).await?);
                }
                cities
            }
        };

        debug!(%place_type, name, cities = cities.len(), "resolved geographic scope");
        Ok(cities)
    }

    /// People resident in any of `location_ids`, in graph-store order.
    /// Stops before the join when there are no locations, and before the
    /// graph lookup when nobody lives there.
    pub async fn people_in(&self, location_ids: &[i64]) -> Result<Lookup<PersonSummary>> {
        if location_ids.is_empty() {
            return Ok(Lookup::Empty(EmptyReason::NoLocations));
        }

        let residences = self
            .docs
            .find(
                IS_LOCATED_IN_PLACE,
                &Filter::new().is_in("placeId", location_ids.iter().map(|id| to_doc(*id))),
                Some(&["personId"][..]),
            )
            .await?;
        let person_ids = distinct(doc_ids(&residences, "personId"));
        if person_ids.is_empty() {
            return Ok(Lookup::Empty(EmptyReason::NoPeople));
        }

        let q = GraphQuery::new("people_by_ids", PEOPLE_BY_IDS)
            .param("personIds", person_ids)
            .column("id", ColumnKind::Int)
            .column("firstName", ColumnKind::Text)
            .column("lastName", ColumnKind::Text);
        let rows = self.graph.run(&q).await?;

        let people = rows.iter().map(row_to_person).collect::<Result<Vec<_>>>()?;
        Ok(Lookup::Found(people))
    }

    /// `resolve_scope` followed by `people_in`.
    pub async fn people_in_scope(&self, place_type: &str, name: &str) -> Result<Lookup<PersonSummary>> {
        let locations = self.resolve_scope(place_type, name).await?;
        self.people_in(&locations).await
    }

    async fn find_place(&self, place_type: PlaceType, name: &str) -> Result<Option<i64>> {
        let filter = Filter::new().eq("name", name).eq("type", place_type.as_str());
        let place = self.docs.find_one(PLACE, &filter).await?;
        Ok(place.and_then(|p| p.get("id").and_then(doc_id)))
    }

    async fn contained_places(&self, place_id: i64) -> Result<Vec<i64>> {
        let rows = self
            .docs
            .find(
                PLACE_IS_PART_OF_PLACE,
                &Filter::new().eq("placeFrom", to_doc(place_id)),
                Some(&["placeTo"][..]),
            )
            .await?;
        Ok(doc_ids(&rows, "placeTo"))
    }
}

/// Map a `{id, firstName, lastName}` row. Missing names come back empty.
pub(crate) fn row_to_person(row: &GraphRecord) -> Result<PersonSummary> {
    Ok(PersonSummary {
        id: to_wire(row.int("id")?),
        first_name: row.opt_text("firstName").unwrap_or_default(),
        last_name: row.opt_text("lastName").unwrap_or_default(),
    })
}

/// Drop repeated ids, keeping first-seen order.
pub(crate) fn distinct(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
