//! Lookup tables consumed by the association scan.
//!
//! Both tables keep the last value written for a repeated key. That is a
//! known ambiguity of the input data rather than a resolution rule: each
//! overwrite is logged and counted so callers can detect it.

use crate::error::{Error, Result};
use crate::records::{Coordinates, FacilityLocation, SpeciesName, SpeciesRecord, UniqueId};
use std::collections::HashMap;

/// Latin name → species identifier.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    ids: HashMap<String, UniqueId>,
    overwritten: usize,
}

impl NameTable {
    /// Build from accepted species records.
    pub fn from_records(records: &[SpeciesRecord]) -> Result<Self> {
        Self::from_names(records.iter().map(SpeciesName::from))
    }

    /// Build from `(UniqueID, Latin Name)` rows.
    ///
    /// Rows with an absent or empty Latin name cannot match a line of the
    /// stream meaningfully and are left out.
    pub fn from_names<I>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = SpeciesName>,
    {
        let mut table = Self::default();
        let mut rows = 0usize;

        for name in names {
            rows += 1;
            let latin = match name.latin_name {
                Some(latin) if !latin.is_empty() => latin,
                _ => continue,
            };
            if let Some(previous) = table.ids.insert(latin.clone(), name.unique_id) {
                table.overwritten += 1;
                log::warn!(
                    "Latin name {:?} maps to both {} and {}; keeping {}",
                    latin,
                    previous,
                    name.unique_id,
                    name.unique_id
                );
            }
        }

        if rows == 0 {
            return Err(Error::EmptyTable("species".to_string()));
        }
        Ok(table)
    }

    /// Identifier for a line equal to a Latin name.
    pub fn get(&self, line: &str) -> Option<UniqueId> {
        self.ids.get(line).copied()
    }

    /// True if `line` is a known Latin name.
    pub fn contains(&self, line: &str) -> bool {
        self.ids.contains_key(line)
    }

    /// Number of distinct Latin names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no Latin name is known.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// How many rows replaced an earlier mapping.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

/// Facility code → coordinates.
#[derive(Debug, Clone, Default)]
pub struct FacilityTable {
    locations: HashMap<String, Coordinates>,
    overwritten: usize,
}

impl FacilityTable {
    /// Build from facility rows; one entry per code.
    pub fn from_locations(locations: &[FacilityLocation]) -> Result<Self> {
        if locations.is_empty() {
            return Err(Error::EmptyTable("facilities".to_string()));
        }

        let mut table = Self::default();
        for location in locations {
            if table
                .locations
                .insert(location.code.clone(), location.coordinates())
                .is_some()
            {
                table.overwritten += 1;
                log::warn!("Facility code {:?} listed more than once; keeping last", location.code);
            }
        }
        Ok(table)
    }

    /// Coordinates for a line equal to a facility code.
    pub fn get(&self, line: &str) -> Option<Coordinates> {
        self.locations.get(line).copied()
    }

    /// True if `line` is a known facility code.
    pub fn contains(&self, line: &str) -> bool {
        self.locations.contains_key(line)
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True if no code is known.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// How many rows replaced an earlier mapping.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(id: u32, latin: Option<&str>) -> SpeciesName {
        SpeciesName {
            unique_id: UniqueId(id),
            latin_name: latin.map(str::to_string),
        }
    }

    #[test]
    fn test_name_table_lookup() {
        let table = NameTable::from_names(vec![
            name(1001, Some("Panthera leo")),
            name(1002, Some("Panthera tigris")),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Panthera leo"), Some(UniqueId(1001)));
        assert!(table.contains("Panthera tigris"));
        assert!(!table.contains("panthera leo"));
        assert_eq!(table.overwritten(), 0);
    }

    #[test]
    fn test_name_table_skips_absent_and_empty() {
        let table = NameTable::from_names(vec![name(1, None), name(2, Some("")), name(3, Some("A b"))]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.contains(""));
    }

    #[test]
    fn test_name_table_last_write_wins_is_known_ambiguity() {
        // Two records sharing a Latin name (e.g. differing status) collapse to the later id.
        let table = NameTable::from_names(vec![name(1, Some("Panthera leo")), name(2, Some("Panthera leo"))]).unwrap();
        assert_eq!(table.get("Panthera leo"), Some(UniqueId(2)));
        assert_eq!(table.overwritten(), 1);
    }

    #[test]
    fn test_name_table_empty_input_is_fatal() {
        assert!(matches!(
            NameTable::from_names(Vec::new()),
            Err(Error::EmptyTable(table)) if table == "species"
        ));
    }

    #[test]
    fn test_name_table_from_records() {
        let records = vec![SpeciesRecord {
            unique_id: UniqueId(1001),
            english_name: "Lion".to_string(),
            latin_name: Some("Panthera leo".to_string()),
            status: "VU".to_string(),
        }];
        let table = NameTable::from_records(&records).unwrap();
        assert_eq!(table.get("Panthera leo"), Some(UniqueId(1001)));
    }

    #[test]
    fn test_facility_table_lookup_and_overwrite() {
        let table = FacilityTable::from_locations(&[
            FacilityLocation::new("PL001", 1.0, 2.0),
            FacilityLocation::new("PL002", 3.0, 4.0),
            FacilityLocation::new("PL001", 5.0, 6.0),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("PL001"), Some(Coordinates::new(5.0, 6.0)));
        assert_eq!(table.overwritten(), 1);
    }

    #[test]
    fn test_facility_table_empty_input_is_fatal() {
        assert!(matches!(FacilityTable::from_locations(&[]), Err(Error::EmptyTable(_))));
    }
}
