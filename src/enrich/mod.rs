//! Collaborators around the core passes.
//!
//! Network-backed lookups (encyclopedia descriptions, taxonomy, geocoding)
//! are traits here; the crate ships no client for them. The offline steps
//! that follow enrichment, [`group`] and [`backfill`], are implemented
//! directly. None of these steps touches record identity.

pub mod backfill;
pub mod facilities;
pub mod group;

use crate::error::Result;
use crate::records::{SpeciesRecord, UniqueId};
use serde::{Deserialize, Serialize};

pub use backfill::{backfill, BackfillConfig, BackfillReport};
pub use facilities::{locate_facilities, FacilitySite, GeoPoint, Geocoder, Projection};
pub use group::{assign_groups, GroupMapping};

/// Description text and image reference for a species.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Introductory text
    pub text: Option<String>,
    /// Image URL
    pub image_url: Option<String>,
}

impl Description {
    /// True if neither text nor image was found.
    pub fn is_blank(&self) -> bool {
        self.text.is_none() && self.image_url.is_none()
    }
}

/// Source of species descriptions, looked up by page title.
pub trait DescriptionSource {
    /// Describe `title`; `Ok(None)` when the source has no entry.
    fn describe(&self, title: &str) -> Result<Option<Description>>;
}

/// Source of taxonomic classes.
pub trait TaxonomySource {
    /// Class of `latin_name` (e.g. `Mammalia`), if known.
    fn class_of(&self, latin_name: &str) -> Result<Option<String>>;
}

/// A species record with the columns added by downstream collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSpecies {
    /// Identifier
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    /// English name
    #[serde(rename = "English Name")]
    pub english_name: String,
    /// Latin name
    #[serde(rename = "Latin Name")]
    pub latin_name: Option<String>,
    /// Conservation status
    #[serde(rename = "IUCN Status")]
    pub status: String,
    /// Description text
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    /// Taxonomic class
    #[serde(rename = "Class", default)]
    pub class: Option<String>,
    /// Image URL
    #[serde(rename = "Image URL", default)]
    pub image_url: Option<String>,
    /// Coarse group derived from the class
    #[serde(rename = "English Group", default)]
    pub english_group: Option<String>,
}

impl From<SpeciesRecord> for EnrichedSpecies {
    fn from(record: SpeciesRecord) -> Self {
        Self {
            unique_id: record.unique_id,
            english_name: record.english_name,
            latin_name: record.latin_name,
            status: record.status,
            description: None,
            class: None,
            image_url: None,
            english_group: None,
        }
    }
}

/// Attach descriptions and classes to species records.
///
/// Descriptions are looked up by Latin name first and by English name when
/// that yields neither text nor image. The class is looked up by Latin name.
/// A failed lookup is logged and leaves its fields empty.
pub fn enrich_species(
    records: Vec<SpeciesRecord>,
    descriptions: &dyn DescriptionSource,
    taxonomy: &dyn TaxonomySource,
) -> Vec<EnrichedSpecies> {
    let total = records.len();
    let enriched: Vec<EnrichedSpecies> = records
        .into_iter()
        .map(|record| {
            let mut row = EnrichedSpecies::from(record);

            let description = describe_with_fallback(&row, descriptions);
            row.description = description.text;
            row.image_url = description.image_url;

            if let Some(latin) = row.latin_name.as_deref() {
                row.class = match taxonomy.class_of(latin) {
                    Ok(class) => class,
                    Err(e) => {
                        log::warn!("Class lookup failed for {:?}: {}", latin, e);
                        None
                    },
                };
            }
            row
        })
        .collect();

    let described = enriched.iter().filter(|r| r.description.is_some()).count();
    log::info!("Enriched {} species ({} with descriptions)", total, described);
    enriched
}

fn describe_with_fallback(row: &EnrichedSpecies, source: &dyn DescriptionSource) -> Description {
    let lookup = |title: &str| match source.describe(title) {
        Ok(found) => found.unwrap_or_default(),
        Err(e) => {
            log::warn!("Description lookup failed for {:?}: {}", title, e);
            Description::default()
        },
    };

    let by_latin = row.latin_name.as_deref().map(lookup).unwrap_or_default();
    if !by_latin.is_blank() {
        return by_latin;
    }
    lookup(&row.english_name)
}
