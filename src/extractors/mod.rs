//! Species entry extraction from listing text.
//!
//! Marker recognition lives in [`marker`]; [`species`] runs the full pass and
//! hands candidates to the identity registry.

pub mod marker;
pub mod species;

pub use marker::{EntryMatcher, MarkerMatch};
pub use species::{extract_species, Extraction, ExtractionReport, SpeciesExtractor};
