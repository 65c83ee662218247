//! Species extraction pass: marker matching plus identity assignment.

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extractors::marker::{EntryMatcher, MarkerMatch};
use crate::lines::LineStream;
use crate::records::SpeciesRecord;
use crate::registry::{Admission, SpeciesRegistry};

/// Counters collected during one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Lines scanned
    pub lines: usize,
    /// Lines containing the sentinel
    pub markers: usize,
    /// Marker lines without an extractable English name
    pub unparseable: usize,
    /// Entries dropped as repeats of an accepted triple
    pub duplicates: usize,
    /// Records accepted
    pub accepted: usize,
}

/// Records and counters produced by [`SpeciesExtractor::extract`].
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Accepted records in order of first appearance
    pub records: Vec<SpeciesRecord>,
    /// Pass counters
    pub report: ExtractionReport,
}

/// Runs the extraction pass over a line stream.
#[derive(Debug, Clone)]
pub struct SpeciesExtractor {
    matcher: EntryMatcher,
    starting_id: u32,
}

impl Default for SpeciesExtractor {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        Self {
            matcher: EntryMatcher::default(),
            starting_id: config.starting_id,
        }
    }
}

impl SpeciesExtractor {
    /// Create an extractor from a configuration.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            matcher: EntryMatcher::new(config)?,
            starting_id: config.starting_id,
        })
    }

    /// The compiled marker grammar.
    pub fn matcher(&self) -> &EntryMatcher {
        &self.matcher
    }

    /// Extract deduplicated, identified records.
    ///
    /// Every call starts a fresh registry, so running twice over the same
    /// stream yields identical records. Fails only when the identifier space
    /// above the starting id runs out.
    pub fn extract(&self, stream: &LineStream) -> Result<Extraction> {
        let mut registry = SpeciesRegistry::new(self.starting_id);
        let mut report = ExtractionReport {
            lines: stream.len(),
            ..Default::default()
        };

        for (i, outcome) in self.matcher.scan(stream) {
            report.markers += 1;
            let candidate = match outcome {
                MarkerMatch::Entry(candidate) => candidate,
                _ => {
                    report.unparseable += 1;
                    log::debug!("Line {}: marker without English name, skipped", i);
                    continue;
                },
            };

            match registry.offer(&candidate)? {
                Admission::Accepted(id) => {
                    report.accepted += 1;
                    log::debug!("Line {}: accepted {} as {}", i, candidate.english_name, id);
                },
                Admission::Duplicate(id) => {
                    report.duplicates += 1;
                    log::debug!("Line {}: duplicate of {}", i, id);
                },
            }
        }

        log::info!(
            "Extracted {} species from {} lines ({} markers, {} unparseable, {} duplicates)",
            report.accepted,
            report.lines,
            report.markers,
            report.unparseable,
            report.duplicates
        );

        Ok(Extraction {
            records: registry.into_records(),
            report,
        })
    }
}

/// Extract species records with the given configuration.
pub fn extract_species(stream: &LineStream, config: &ExtractionConfig) -> Result<Extraction> {
    SpeciesExtractor::new(config)?.extract(stream)
}
