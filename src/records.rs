//! Record types shared by the extraction and linking passes.
//!
//! Field names on disk follow the column headers of the persisted tables
//! (`UniqueID`, `English Name`, `Latin Name`, `IUCN Status`, `Code`, `X`, `Y`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a species record on first acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(pub u32);

impl UniqueId {
    /// Raw integer value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UniqueId {
    fn from(value: u32) -> Self {
        UniqueId(value)
    }
}

/// A species entry found in the listing text, before identity is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesCandidate {
    /// English name captured after the separator
    pub english_name: String,
    /// Lookback line, `None` for a marker on the first line
    pub latin_name: Option<String>,
    /// Status field value or the configured default
    pub status: String,
}

impl SpeciesCandidate {
    /// Composite deduplication key of this candidate.
    pub fn key(&self) -> SpeciesKey {
        SpeciesKey {
            english_name: self.english_name.clone(),
            latin_name: self.latin_name.clone(),
            status: self.status.clone(),
        }
    }
}

/// The (English name, Latin name, status) triple used for deduplication.
///
/// Equality is exact. An absent Latin name differs from every string,
/// including the empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpeciesKey {
    /// English name
    pub english_name: String,
    /// Latin name
    pub latin_name: Option<String>,
    /// Status
    pub status: String,
}

/// An accepted, uniquely identified species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Identifier, unique within one extraction run
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    /// English name
    #[serde(rename = "English Name")]
    pub english_name: String,
    /// Latin name taken from the lookback line
    #[serde(rename = "Latin Name")]
    pub latin_name: Option<String>,
    /// Conservation status
    #[serde(rename = "IUCN Status")]
    pub status: String,
}

impl SpeciesRecord {
    /// Build a record from a candidate and its assigned identifier.
    pub fn from_candidate(unique_id: UniqueId, candidate: SpeciesCandidate) -> Self {
        Self {
            unique_id,
            english_name: candidate.english_name,
            latin_name: candidate.latin_name,
            status: candidate.status,
        }
    }

    /// Composite deduplication key of this record.
    pub fn key(&self) -> SpeciesKey {
        SpeciesKey {
            english_name: self.english_name.clone(),
            latin_name: self.latin_name.clone(),
            status: self.status.clone(),
        }
    }
}

/// The two columns of the species table the linking pass needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesName {
    /// Identifier
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    /// Latin name, possibly absent
    #[serde(rename = "Latin Name")]
    pub latin_name: Option<String>,
}

impl From<&SpeciesRecord> for SpeciesName {
    fn from(record: &SpeciesRecord) -> Self {
        Self {
            unique_id: record.unique_id,
            latin_name: record.latin_name.clone(),
        }
    }
}

/// Projected coordinate pair of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A facility code with its coordinates, produced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLocation {
    /// Facility code as it appears on its own line in the listing
    #[serde(rename = "Code")]
    pub code: String,
    /// Easting
    #[serde(rename = "X")]
    pub x: f64,
    /// Northing
    #[serde(rename = "Y")]
    pub y: f64,
}

impl FacilityLocation {
    /// Create a facility location.
    pub fn new(code: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            code: code.into(),
            x,
            y,
        }
    }

    /// Coordinates of this facility.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

/// Link between a species and a facility holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// Species identifier
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    /// Facility code
    #[serde(rename = "Code")]
    pub code: String,
    /// Easting of the facility
    #[serde(rename = "X")]
    pub x: f64,
    /// Northing of the facility
    #[serde(rename = "Y")]
    pub y: f64,
}
