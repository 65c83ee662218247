//! Taxonomic class → coarse English group.

use super::EnrichedSpecies;
use std::collections::HashMap;

/// Group used for classes absent from the mapping.
pub const FALLBACK_GROUP: &str = "Invertebrates";

/// Mapping from taxonomic class to display group.
#[derive(Debug, Clone)]
pub struct GroupMapping {
    groups: HashMap<String, String>,
    fallback: String,
}

impl Default for GroupMapping {
    fn default() -> Self {
        let pairs = [
            ("Mammalia", "Mammals"),
            ("Aves", "Birds"),
            ("Crocodylia", "Reptiles"),
            ("Squamata", "Reptiles"),
            ("Testudines", "Reptiles"),
            ("Amphibia", "Amphibians"),
            ("Dipneusti", "Fish"),
            ("Elasmobranchii", "Fish"),
        ];
        Self {
            groups: pairs
                .iter()
                .map(|(class, group)| (class.to_string(), group.to_string()))
                .collect(),
            fallback: FALLBACK_GROUP.to_string(),
        }
    }
}

impl GroupMapping {
    /// Add or replace one class mapping.
    pub fn with_entry(mut self, class: impl Into<String>, group: impl Into<String>) -> Self {
        self.groups.insert(class.into(), group.into());
        self
    }

    /// Set the group for unmapped classes.
    pub fn with_fallback(mut self, group: impl Into<String>) -> Self {
        self.fallback = group.into();
        self
    }

    /// Group for `class`.
    pub fn group_for(&self, class: &str) -> &str {
        self.groups.get(class).map(String::as_str).unwrap_or(&self.fallback)
    }
}

/// Fill the `English Group` column in table order.
///
/// A row without a class inherits the last group assigned above it; rows
/// before the first classified row stay empty. Returns the number of rows
/// that received a group.
pub fn assign_groups(rows: &mut [EnrichedSpecies], mapping: &GroupMapping) -> usize {
    let mut last_group: Option<String> = None;
    let mut assigned = 0;

    for (i, row) in rows.iter_mut().enumerate() {
        match row.class.as_deref() {
            Some(class) => {
                let group = mapping.group_for(class).to_string();
                log::debug!("Row {}: class {:?} -> {:?}", i + 1, class, group);
                last_group = Some(group.clone());
                row.english_group = Some(group);
                assigned += 1;
            },
            None => match &last_group {
                Some(group) => {
                    row.english_group = Some(group.clone());
                    assigned += 1;
                },
                None => log::debug!("Row {}: no class and no earlier group", i + 1),
            },
        }
    }

    assigned
}
