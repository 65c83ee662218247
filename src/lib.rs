// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # cites_ledger
//!
//! Extraction and linking engine for species listing documents.
//!
//! A listing is long, semi-structured text: each species entry is a marker
//! line (containing `CITES`) preceded by its Latin name, and is followed by
//! the codes of the facilities holding it. This crate
//!
//! 1. flattens the pages into one stream of trimmed lines ([`lines`]);
//! 2. recognizes marker lines and captures English name, Latin name and
//!    status ([`extractors`]);
//! 3. deduplicates entries and assigns ids from a seed ([`registry`]);
//! 4. replays the stream to bind facility codes to the species above them
//!    ([`linking`]).
//!
//! Downstream steps (descriptions, taxonomy, grouping, backfill, geocoding)
//! live in [`enrich`]; table persistence in [`io`].
//!
//! ## Quick Start
//!
//! ```
//! use cites_ledger::extractors::SpeciesExtractor;
//! use cites_ledger::lines::LineStream;
//! use cites_ledger::linking::{link_species, FacilityTable, NameTable};
//! use cites_ledger::records::FacilityLocation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stream = LineStream::from_pages([
//!     "Panthera leo\nCITES II / Lion, Löwe, IUCN: VU\nPL001\nPL002",
//! ]);
//!
//! let extraction = SpeciesExtractor::default().extract(&stream)?;
//! assert_eq!(extraction.records[0].english_name, "Lion");
//!
//! let names = NameTable::from_records(&extraction.records)?;
//! let facilities = FacilityTable::from_locations(&[
//!     FacilityLocation::new("PL001", 637_000.0, 486_000.0),
//!     FacilityLocation::new("PL002", 502_000.0, 268_000.0),
//! ])?;
//!
//! let links = link_species(&stream, &names, &facilities);
//! assert_eq!(links.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Record types
pub mod records;

// Line stream
pub mod lines;

// Extraction pass
pub mod extractors;
pub mod registry;

// Linking pass
pub mod linking;

// Downstream collaborators
pub mod enrich;

// Table persistence
pub mod io;

pub use config::ExtractionConfig;
pub use error::{Error, Result};
pub use extractors::{Extraction, SpeciesExtractor};
pub use lines::LineStream;
pub use linking::{link_species, FacilityTable, NameTable};
pub use records::{AssociationRecord, FacilityLocation, SpeciesRecord, UniqueId};
