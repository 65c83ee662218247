//! Reading and writing the persisted tables.
//!
//! Tables are CSV with a header row, or a JSON array of objects. The format is
//! chosen from the file extension (`.json` → JSON, anything else → CSV).
//! Readers check the header row (CSV) or each object's keys (JSON) for the
//! columns a stage needs before the row is decoded, so a malformed table
//! aborts the run instead of decoding absent fields as empty.

use crate::enrich::{EnrichedSpecies, FacilitySite};
use crate::error::{Error, Result};
use crate::records::{AssociationRecord, FacilityLocation, SpeciesName, SpeciesRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Columns of the species table.
pub const SPECIES_COLUMNS: &[&str] = &["UniqueID", "English Name", "Latin Name", "IUCN Status"];

/// Columns the linking pass reads from the species table.
pub const SPECIES_NAME_COLUMNS: &[&str] = &["UniqueID", "Latin Name"];

/// Columns of the facility table.
pub const FACILITY_COLUMNS: &[&str] = &["Code", "X", "Y"];

/// Columns of the facility site table read before geocoding.
pub const SITE_COLUMNS: &[&str] = &["Code", "Address"];

/// Columns of the association table.
pub const ASSOCIATION_COLUMNS: &[&str] = &["UniqueID", "Code", "X", "Y"];

/// Columns of the enriched species table.
pub const ENRICHED_COLUMNS: &[&str] = &[
    "UniqueID",
    "English Name",
    "Latin Name",
    "IUCN Status",
    "Description",
    "Class",
    "Image URL",
];

/// On-disk table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl TableFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TableFormat::Json,
            _ => TableFormat::Csv,
        }
    }
}

/// Write rows to `path` in the format implied by its extension.
///
/// `columns` is written as the CSV header when `rows` is empty, so an empty
/// table still reads back.
pub fn write_table<T: Serialize>(path: impl AsRef<Path>, rows: &[T], columns: &[&str]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match TableFormat::from_path(path) {
        TableFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)?;
            if rows.is_empty() {
                writer.write_record(columns)?;
            }
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        },
        TableFormat::Json => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writer.flush()?;
        },
    }

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Read rows from `path`, requiring `columns` to be present.
///
/// `table` names the table in error messages.
pub fn read_table<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    table: &str,
    columns: &[&str],
) -> Result<Vec<T>> {
    let path = path.as_ref();
    match TableFormat::from_path(path) {
        TableFormat::Csv => read_csv(path, table, columns),
        TableFormat::Json => read_json(path, table, columns),
    }
}

fn missing_columns(table: &str, columns: &[&str], present: impl Fn(&str) -> bool) -> Result<()> {
    let missing: Vec<String> = columns
        .iter()
        .filter(|&&column| !present(column))
        .map(|column| column.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns {
            table: table.to_string(),
            columns: missing,
        })
    }
}

fn read_csv<T: DeserializeOwned>(path: &Path, table: &str, columns: &[&str]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    missing_columns(table, columns, |column| headers.iter().any(|h| h == column))?;

    let rows = reader.deserialize::<T>().collect::<std::result::Result<Vec<T>, _>>()?;
    log::debug!("Read {} rows from {} ({})", rows.len(), path.display(), table);
    Ok(rows)
}

/// JSON rows carry their own keys, so every row is checked. A key holding
/// `null` counts as present.
fn read_json<T: DeserializeOwned>(path: &Path, table: &str, columns: &[&str]) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

    let mut rows = Vec::with_capacity(objects.len());
    for object in objects {
        missing_columns(table, columns, |column| object.contains_key(column))?;
        rows.push(serde_json::from_value(Value::Object(object))?);
    }
    log::debug!("Read {} rows from {} ({})", rows.len(), path.display(), table);
    Ok(rows)
}

/// Write the species table.
pub fn write_species(path: impl AsRef<Path>, records: &[SpeciesRecord]) -> Result<()> {
    write_table(path, records, SPECIES_COLUMNS)
}

/// Read the full species table.
pub fn read_species(path: impl AsRef<Path>) -> Result<Vec<SpeciesRecord>> {
    read_table(path, "species", SPECIES_COLUMNS)
}

/// Read only the identifier and Latin name columns of the species table.
pub fn read_species_names(path: impl AsRef<Path>) -> Result<Vec<SpeciesName>> {
    read_table(path, "species", SPECIES_NAME_COLUMNS)
}

/// Read the facility table.
pub fn read_facilities(path: impl AsRef<Path>) -> Result<Vec<FacilityLocation>> {
    read_table(path, "facilities", FACILITY_COLUMNS)
}

/// Read facility sites (code and address) for geocoding.
pub fn read_sites(path: impl AsRef<Path>) -> Result<Vec<FacilitySite>> {
    read_table(path, "sites", SITE_COLUMNS)
}

/// Write the facility table.
pub fn write_facilities(path: impl AsRef<Path>, locations: &[FacilityLocation]) -> Result<()> {
    write_table(path, locations, FACILITY_COLUMNS)
}

/// Write the association table.
pub fn write_associations(path: impl AsRef<Path>, records: &[AssociationRecord]) -> Result<()> {
    write_table(path, records, ASSOCIATION_COLUMNS)
}

/// Read the association table.
pub fn read_associations(path: impl AsRef<Path>) -> Result<Vec<AssociationRecord>> {
    read_table(path, "associations", ASSOCIATION_COLUMNS)
}

/// Read the enriched species table.
pub fn read_enriched(path: impl AsRef<Path>) -> Result<Vec<EnrichedSpecies>> {
    read_table(path, "enriched species", ENRICHED_COLUMNS)
}

/// Write the enriched species table.
pub fn write_enriched(path: impl AsRef<Path>, records: &[EnrichedSpecies]) -> Result<()> {
    write_table(path, records, ENRICHED_COLUMNS)
}
