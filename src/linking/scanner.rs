//! Association scan: binds facility codes to the species line above them.
//!
//! ```text
//!            line ∈ names                     line ∈ names
//! NoSubject ─────────────▶ HasSubject(id) ◀──────────────┐
//!     │                        │   │                      │
//!     └─ otherwise: stay       │   └──────────────────────┘
//!                              └─ line ∈ codes: emit (id, code), stay
//! ```
//!
//! There is no transition back to `NoSubject`. Codes before the first
//! species line are dropped; codes after the last species line bind to it.

use crate::linking::tables::{FacilityTable, NameTable};
use crate::lines::LineStream;
use crate::records::{AssociationRecord, UniqueId};

/// State of the association scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No species line seen yet
    NoSubject,
    /// Codes bind to this species
    HasSubject(UniqueId),
}

/// Single-pass association state machine.
#[derive(Debug)]
pub struct AssociationScanner<'a> {
    names: &'a NameTable,
    facilities: &'a FacilityTable,
    state: ScanState,
}

impl<'a> AssociationScanner<'a> {
    /// Start a scan in [`ScanState::NoSubject`].
    pub fn new(names: &'a NameTable, facilities: &'a FacilityTable) -> Self {
        Self {
            names,
            facilities,
            state: ScanState::NoSubject,
        }
    }

    /// Current state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed one line; returns a record when a code binds to the subject.
    ///
    /// A line matching both tables is a species line.
    pub fn step(&mut self, line: &str) -> Option<AssociationRecord> {
        if let Some(id) = self.names.get(line) {
            self.state = ScanState::HasSubject(id);
            return None;
        }

        match self.state {
            ScanState::NoSubject => None,
            ScanState::HasSubject(id) => self.facilities.get(line).map(|at| AssociationRecord {
                unique_id: id,
                code: line.to_string(),
                x: at.x,
                y: at.y,
            }),
        }
    }

    /// Walk the whole stream in document order.
    pub fn scan(mut self, stream: &LineStream) -> Vec<AssociationRecord> {
        let mut dropped = 0usize;
        let mut records = Vec::new();

        for line in stream.iter() {
            if self.state == ScanState::NoSubject && self.facilities.contains(line) && !self.names.contains(line) {
                dropped += 1;
            }
            if let Some(record) = self.step(line) {
                records.push(record);
            }
        }

        if dropped > 0 {
            log::debug!("{} facility codes appeared before any species line", dropped);
        }
        log::info!("Linked {} facility listings over {} lines", records.len(), stream.len());
        records
    }
}

/// Run the association scan over `stream`.
pub fn link_species(
    stream: &LineStream,
    names: &NameTable,
    facilities: &FacilityTable,
) -> Vec<AssociationRecord> {
    AssociationScanner::new(names, facilities).scan(stream)
}
