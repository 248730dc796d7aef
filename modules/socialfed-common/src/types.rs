use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FederationError;

/// Placeholder for an organisation the document store has no name for.
pub const UNKNOWN_UNIVERSITY: &str = "Unknown";

/// Sentinel age for a moderator without any acquaintance that has a birthday.
pub const NO_AGE_DATA: &str = "No data";

/// Sentinel age for a moderator whose acquaintance sub-query failed.
pub const AGE_ERROR: &str = "Error";

// --- Geography ---

/// Level of the place hierarchy: continent ⊇ country ⊇ city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    City,
    Country,
    Continent,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::City => "city",
            PlaceType::Country => "country",
            PlaceType::Continent => "continent",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = FederationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "city" => Ok(PlaceType::City),
            "country" => Ok(PlaceType::Country),
            "continent" => Ok(PlaceType::Continent),
            _ => Err(FederationError::invalid(
                "Location type must be city, country, or continent",
            )),
        }
    }
}

/// Echo of the requested scope plus how many people it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    #[serde(rename = "type")]
    pub place_type: String,
    pub name: String,
    pub total_people: usize,
}

// --- Lookup results ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumSummary {
    pub id: String,
    /// Passed through as null when the forum has no title.
    pub title: Option<String>,
}

/// Why a cross-store lookup stopped before reaching the graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoLocations,
    NoPeople,
    NoPosts,
    NoForums,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::NoLocations => "No locations found matching the criteria",
            EmptyReason::NoPeople => "No people found in this location",
            EmptyReason::NoPosts => "No posts found in this language",
            EmptyReason::NoForums => "No forums found containing posts in this language",
        }
    }
}

/// Outcome of a multi-step lookup: rows from the final store, or the step
/// that came back empty. An empty outcome is a valid answer, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(Vec<T>),
    Empty(EmptyReason),
}

impl<T> Lookup<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            Lookup::Found(rows) => rows,
            Lookup::Empty(_) => &[],
        }
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Lookup::Found(_) => None,
            Lookup::Empty(reason) => Some(*reason),
        }
    }
}

// --- Analytics ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityLikes {
    pub university_id: String,
    pub likes: i64,
    pub university_name: String,
}

/// Per-moderator result of the acquaintance-age sub-query.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquaintanceAge {
    Known { average_age: f64, count: i64 },
    NoData,
    Failed,
}

impl AcquaintanceAge {
    /// Average age to one decimal, or the matching sentinel.
    /// Rounds the stored double once, so 31.45 (held just below) gives "31.4".
    pub fn display_average(&self) -> String {
        match self {
            AcquaintanceAge::Known { average_age, .. } => one_decimal(*average_age),
            AcquaintanceAge::NoData => NO_AGE_DATA.to_string(),
            AcquaintanceAge::Failed => AGE_ERROR.to_string(),
        }
    }

    pub fn count(&self) -> i64 {
        match self {
            AcquaintanceAge::Known { count, .. } => *count,
            AcquaintanceAge::NoData | AcquaintanceAge::Failed => 0,
        }
    }
}

/// One-decimal rendering with exact ties rounded up.
///
/// `{:.1}` rounds exact ties to even; ties only exist at quarters, which
/// are handled in integer tenths instead.
fn one_decimal(value: f64) -> String {
    if value >= 0.0 && (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0 {
        let tenths = (value * 10.0 + 0.5).floor() as i64;
        return format!("{}.{}", tenths / 10, tenths % 10);
    }
    format!("{value:.1}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorAcquaintanceAge {
    pub name: String,
    pub id: String,
    pub average_age_of_known_people: String,
    pub number_of_known_people: i64,
    #[serde(skip)]
    pub outcome: AcquaintanceAge,
}

impl ModeratorAcquaintanceAge {
    pub fn new(name: String, id: String, outcome: AcquaintanceAge) -> Self {
        Self {
            name,
            id,
            average_age_of_known_people: outcome.display_average(),
            number_of_known_people: outcome.count(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagGenderDominance {
    pub tag_name: String,
    pub most_common_gender: String,
    pub count: i64,
    pub dominance_ratio: f64,
}
