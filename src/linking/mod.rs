//! Linking species to facilities by replaying the line stream.
//!
//! [`tables`] builds the name and facility lookups; [`scanner`] walks the
//! stream with a two-state machine and emits association records.

pub mod scanner;
pub mod tables;

pub use scanner::{link_species, AssociationScanner, ScanState};
pub use tables::{FacilityTable, NameTable};
