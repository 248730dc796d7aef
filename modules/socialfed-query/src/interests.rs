use std::collections::HashMap;

use socialfed_common::error::Result;
use socialfed_common::TagGenderDominance;
use socialfed_graph::{ColumnKind, GraphQuery};

use crate::Federation;

const INTEREST_GENDER_COUNTS: &str = "MATCH (person:Person)-[:INTEREST]->(tag:Tag)
     WHERE person.gender IS NOT NULL
     WITH tag.name AS tagName, person.gender AS gender, count(person) AS count
     RETURN tagName, gender, count
     ORDER BY tagName, count DESC";

/// One `(tag, gender, count)` group from the graph aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenderCount {
    pub tag_name: String,
    pub gender: String,
    pub count: i64,
}

impl Federation {
    /// For every interest tag followed by more than one gender, the most
    /// frequent gender among its followers and that gender's share.
    /// Ordered by the dominant count, highest first.
    pub async fn gender_dominance_by_tag(&self) -> Result<Vec<TagGenderDominance>> {
        let q = GraphQuery::new("interest_gender_counts", INTEREST_GENDER_COUNTS)
            .column("tagName", ColumnKind::Text)
            .column("gender", ColumnKind::Text)
            .column("count", ColumnKind::Int);

        let counts = self
            .graph
            .run(&q)
            .await?
            .iter()
            .map(|row| {
                Ok(GenderCount {
                    tag_name: row.text("tagName")?,
                    gender: row.text("gender")?,
                    count: row.int("count")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(dominance_by_tag(counts))
    }
}

/// Reduce per-(tag, gender) counts to one dominance row per tag.
///
/// Groups are visited in store order. Within a tag the dominant gender is the
/// first one reaching the highest count, so ties resolve to whatever the store
/// returned first. Tags with a single gender are dropped. The output is
/// stable-sorted by dominant count, descending.
pub fn dominance_by_tag(counts: Vec<GenderCount>) -> Vec<TagGenderDominance> {
    let mut order: Vec<String> = Vec::new();
    let mut by_tag: HashMap<String, Vec<(String, i64)>> = HashMap::new();

    for GenderCount { tag_name, gender, count } in counts {
        let genders = by_tag.entry(tag_name.clone()).or_insert_with(|| {
            order.push(tag_name);
            Vec::new()
        });
        match genders.iter_mut().find(|(g, _)| *g == gender) {
            Some((_, existing)) => *existing += count,
            None => genders.push((gender, count)),
        }
    }

    let mut rows: Vec<TagGenderDominance> = order
        .into_iter()
        .filter_map(|tag_name| {
            let genders = by_tag.remove(&tag_name)?;
            if genders.len() < 2 {
                return None;
            }
            let total: i64 = genders.iter().map(|(_, c)| c).sum();
            let (gender, count) = genders
                .iter()
                .fold(None::<&(String, i64)>, |best, entry| match best {
                    Some(b) if b.1 >= entry.1 => Some(b),
                    _ => Some(entry),
                })?;
            if total <= 0 {
                return None;
            }
            Some(TagGenderDominance {
                tag_name,
                most_common_gender: gender.clone(),
                count: *count,
                dominance_ratio: *count as f64 / total as f64,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gc(tag: &str, gender: &str, count: i64) -> GenderCount {
        GenderCount {
            tag_name: tag.to_string(),
            gender: gender.to_string(),
            count,
        }
    }

    #[test]
    fn single_gender_tags_are_excluded() {
        let rows = dominance_by_tag(vec![
            gc("Bach", "female", 5),
            gc("Mozart", "male", 3),
            gc("Mozart", "female", 1),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag_name, "Mozart");
    }

    #[test]
    fn dominant_gender_and_ratio() {
        let rows = dominance_by_tag(vec![gc("Mozart", "male", 3), gc("Mozart", "female", 1)]);
        assert_eq!(rows[0].most_common_gender, "male");
        assert_eq!(rows[0].count, 3);
        assert!((rows[0].dominance_ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn sorted_by_dominant_count_descending() {
        let rows = dominance_by_tag(vec![
            gc("A", "male", 2),
            gc("A", "female", 1),
            gc("B", "female", 9),
            gc("B", "male", 4),
            gc("C", "male", 5),
            gc("C", "female", 5),
        ]);
        let counts: Vec<i64> = rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![9, 5, 2]);
    }

    #[test]
    fn tied_tag_reports_half_share_for_some_gender() {
        let rows = dominance_by_tag(vec![gc("C", "male", 5), gc("C", "female", 5)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 5);
        assert!((rows[0].dominance_ratio - 0.5).abs() < 1e-9);
        assert!(["male", "female"].contains(&rows[0].most_common_gender.as_str()));
    }

    #[test]
    fn dominant_is_found_even_if_rows_arrive_unsorted() {
        let rows = dominance_by_tag(vec![gc("T", "female", 1), gc("T", "male", 4)]);
        assert_eq!(rows[0].most_common_gender, "male");
        assert_eq!(rows[0].count, 4);
    }
}
