//! Identity assignment for extracted species.
//!
//! The registry accepts each distinct (English name, Latin name, status)
//! triple once and hands it the next identifier of its own [`IdSequence`].
//! Repeats are dropped without consuming an identifier, so accepted ids are
//! contiguous from the seed in order of first appearance.

use crate::config::DEFAULT_STARTING_ID;
use crate::error::{Error, Result};
use crate::records::{SpeciesCandidate, SpeciesKey, SpeciesRecord, UniqueId};
use indexmap::IndexMap;

/// Monotonic identifier generator.
///
/// `u32::MAX` is the last identifier handed out; the sequence is exhausted
/// after it.
#[derive(Debug)]
pub struct IdSequence {
    next: Option<u32>,
}

impl IdSequence {
    /// Start a sequence at `seed`.
    pub fn new(seed: u32) -> Self {
        Self { next: Some(seed) }
    }

    /// Value the next call to [`advance`](Self::advance) will return, or
    /// `None` once exhausted.
    pub fn peek(&self) -> Option<UniqueId> {
        self.next.map(UniqueId)
    }

    /// Take the current value and move forward.
    pub fn advance(&mut self) -> Result<UniqueId> {
        let value = self.next.ok_or(Error::IdsExhausted)?;
        self.next = value.checked_add(1);
        Ok(UniqueId(value))
    }
}

/// Result of offering a candidate to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First occurrence; a new identifier was assigned
    Accepted(UniqueId),
    /// Triple already present; carries the existing identifier
    Duplicate(UniqueId),
}

impl Admission {
    /// True for a first occurrence.
    pub fn is_accepted(self) -> bool {
        matches!(self, Admission::Accepted(_))
    }
}

/// Append-only set of accepted species records.
#[derive(Debug)]
pub struct SpeciesRegistry {
    accepted: IndexMap<SpeciesKey, UniqueId>,
    sequence: IdSequence,
}

impl Default for SpeciesRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_ID)
    }
}

impl SpeciesRegistry {
    /// Create an empty registry whose first identifier is `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            accepted: IndexMap::new(),
            sequence: IdSequence::new(seed),
        }
    }

    /// Offer a candidate; assigns an identifier on first occurrence only.
    ///
    /// Fails with [`Error::IdsExhausted`] when a new triple arrives after the
    /// last identifier was taken. Repeats still resolve.
    pub fn offer(&mut self, candidate: &SpeciesCandidate) -> Result<Admission> {
        let key = candidate.key();
        if let Some(&id) = self.accepted.get(&key) {
            return Ok(Admission::Duplicate(id));
        }
        let id = self.sequence.advance()?;
        self.accepted.insert(key, id);
        Ok(Admission::Accepted(id))
    }

    /// Identifier the next accepted candidate will receive.
    pub fn next_id(&self) -> Option<UniqueId> {
        self.sequence.peek()
    }

    /// Number of accepted records.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// True if nothing has been accepted.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Consume the registry, returning records in acceptance order.
    pub fn into_records(self) -> Vec<SpeciesRecord> {
        self.accepted
            .into_iter()
            .map(|(key, id)| SpeciesRecord {
                unique_id: id,
                english_name: key.english_name,
                latin_name: key.latin_name,
                status: key.status,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(english: &str, latin: Option<&str>, status: &str) -> SpeciesCandidate {
        SpeciesCandidate {
            english_name: english.to_string(),
            latin_name: latin.map(str::to_string),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_sequence() {
        let mut seq = IdSequence::new(5);
        assert_eq!(seq.peek(), Some(UniqueId(5)));
        assert_eq!(seq.advance().unwrap(), UniqueId(5));
        assert_eq!(seq.advance().unwrap(), UniqueId(6));
        assert_eq!(seq.peek(), Some(UniqueId(7)));
    }

    #[test]
    fn test_sequence_hands_out_max_then_stops() {
        let mut seq = IdSequence::new(u32::MAX);
        assert_eq!(seq.advance().unwrap(), UniqueId(u32::MAX));
        assert_eq!(seq.peek(), None);
        assert!(matches!(seq.advance(), Err(Error::IdsExhausted)));
    }

    #[test]
    fn test_registry_at_id_limit() {
        let mut registry = SpeciesRegistry::new(u32::MAX);
        let lion = candidate("Lion", Some("Panthera leo"), "VU");

        assert_eq!(registry.offer(&lion).unwrap(), Admission::Accepted(UniqueId(u32::MAX)));
        assert_eq!(registry.offer(&lion).unwrap(), Admission::Duplicate(UniqueId(u32::MAX)));

        let tiger = candidate("Tiger", Some("Panthera tigris"), "EN");
        assert!(matches!(registry.offer(&tiger), Err(Error::IdsExhausted)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_seed() {
        let mut registry = SpeciesRegistry::default();
        let admission = registry.offer(&candidate("Lion", Some("Panthera leo"), "VU")).unwrap();
        assert_eq!(admission, Admission::Accepted(UniqueId(1001)));
    }

    #[test]
    fn test_duplicate_does_not_consume_id() {
        let mut registry = SpeciesRegistry::new(1);
        let lion = candidate("Lion", Some("Panthera leo"), "VU");

        assert_eq!(registry.offer(&lion).unwrap(), Admission::Accepted(UniqueId(1)));
        assert_eq!(registry.offer(&lion).unwrap(), Admission::Duplicate(UniqueId(1)));
        assert_eq!(registry.next_id(), Some(UniqueId(2)));

        let tiger = candidate("Tiger", Some("Panthera tigris"), "EN");
        assert_eq!(registry.offer(&tiger).unwrap(), Admission::Accepted(UniqueId(2)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_any_field_difference_is_new_record() {
        let mut registry = SpeciesRegistry::new(1);
        registry.offer(&candidate("Lion", Some("Panthera leo"), "VU")).unwrap();

        assert!(registry.offer(&candidate("Lion", Some("Panthera leo"), "EN")).unwrap().is_accepted());
        assert!(registry.offer(&candidate("lion", Some("Panthera leo"), "VU")).unwrap().is_accepted());
        assert!(registry.offer(&candidate("Lion", None, "VU")).unwrap().is_accepted());
        assert!(registry.offer(&candidate("Lion", Some(""), "VU")).unwrap().is_accepted());
        assert!(!registry.offer(&candidate("Lion", None, "VU")).unwrap().is_accepted());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_records_in_acceptance_order() {
        let mut registry = SpeciesRegistry::new(10);
        registry.offer(&candidate("B", None, "x")).unwrap();
        registry.offer(&candidate("A", None, "x")).unwrap();
        registry.offer(&candidate("B", None, "x")).unwrap();

        let names: Vec<_> = registry
            .into_records()
            .into_iter()
            .map(|r| (r.unique_id.value(), r.english_name))
            .collect();
        assert_eq!(names, vec![(10, "B".to_string()), (11, "A".to_string())]);
    }
}
