//! End-to-end tests: extract, persist, reload, and link.

use cites_ledger::extractors::SpeciesExtractor;
use cites_ledger::io;
use cites_ledger::lines::LineStream;
use cites_ledger::linking::{link_species, AssociationScanner, FacilityTable, NameTable, ScanState};
use cites_ledger::records::{AssociationRecord, FacilityLocation, UniqueId};
use cites_ledger::Error;

fn listing() -> LineStream {
    LineStream::from_pages([
        "PL009\n\
         Panthera leo\n\
         CITES II / Lion, Löwe, IUCN: VU\n\
         PL001\n\
         PL002",
        "Elephas maximus\n\
         CITES I / Asian elephant, IUCN: EN\n\
         PL003\n\
         Zoo index\n\
         PL001",
    ])
}

fn facilities() -> Vec<FacilityLocation> {
    vec![
        FacilityLocation::new("PL001", 637_412.5, 486_123.0),
        FacilityLocation::new("PL002", 502_900.0, 268_400.25),
        FacilityLocation::new("PL003", 463_100.0, 558_700.0),
        FacilityLocation::new("PL009", 1.0, 1.0),
    ]
}

fn pairs(records: &[AssociationRecord]) -> Vec<(u32, &str)> {
    records.iter().map(|r| (r.unique_id.value(), r.code.as_str())).collect()
}

mod in_memory {
    use super::*;

    #[test]
    fn test_link_extracted_records() {
        let stream = listing();
        let records = SpeciesExtractor::default().extract(&stream).unwrap().records;

        let names = NameTable::from_records(&records).unwrap();
        let facilities = FacilityTable::from_locations(&facilities()).unwrap();
        let links = link_species(&stream, &names, &facilities);

        // PL009 precedes every species line and is dropped
        assert_eq!(
            pairs(&links),
            vec![(1001, "PL001"), (1001, "PL002"), (1002, "PL003"), (1002, "PL001")]
        );
        assert_eq!(links[1].x, 502_900.0);
        assert_eq!(links[1].y, 268_400.25);
    }

    #[test]
    fn test_scanner_state_after_walk() {
        let stream = listing();
        let records = SpeciesExtractor::default().extract(&stream).unwrap().records;
        let names = NameTable::from_records(&records).unwrap();
        let facilities = FacilityTable::from_locations(&facilities()).unwrap();

        let mut scanner = AssociationScanner::new(&names, &facilities);
        for line in stream.iter() {
            scanner.step(line);
        }
        assert_eq!(scanner.state(), ScanState::HasSubject(UniqueId(1002)));
    }

    #[test]
    fn test_duplicate_latin_name_links_to_last_id() {
        // Known ambiguity: the same Latin name with two statuses yields two
        // records, and the name table keeps only the later id.
        let stream = LineStream::from_pages([
            "Panthera leo\nCITES II / Lion, IUCN: VU\nPanthera leo\nCITES II / Lion, IUCN: EN\nPanthera leo\nPL001",
        ]);
        let records = SpeciesExtractor::default().extract(&stream).unwrap().records;
        assert_eq!(records.len(), 2);

        let names = NameTable::from_records(&records).unwrap();
        assert_eq!(names.overwritten(), 1);

        let facilities = FacilityTable::from_locations(&facilities()).unwrap();
        let links = link_species(&stream, &names, &facilities);
        assert_eq!(pairs(&links), vec![(1002, "PL001")]);
    }
}

mod persisted {
    use super::*;

    #[test]
    fn test_round_trip_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let species_path = dir.path().join("species.csv");
        let facilities_path = dir.path().join("zoos.csv");
        let links_path = dir.path().join("links.csv");

        let stream = listing();
        let records = SpeciesExtractor::default().extract(&stream).unwrap().records;
        io::write_species(&species_path, &records).unwrap();
        io::write_facilities(&facilities_path, &facilities()).unwrap();

        let header = std::fs::read_to_string(&species_path).unwrap();
        assert!(header.starts_with("UniqueID,English Name,Latin Name,IUCN Status"));

        let names = NameTable::from_names(io::read_species_names(&species_path).unwrap()).unwrap();
        let facilities = FacilityTable::from_locations(&io::read_facilities(&facilities_path).unwrap()).unwrap();
        let links = link_species(&stream, &names, &facilities);
        io::write_associations(&links_path, &links).unwrap();

        let reloaded = io::read_associations(&links_path).unwrap();
        assert_eq!(reloaded, links);
        assert_eq!(reloaded.len(), 4);
    }

    #[test]
    fn test_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let species_path = dir.path().join("species.json");

        let records = SpeciesExtractor::default().extract(&listing()).unwrap().records;
        io::write_species(&species_path, &records).unwrap();

        assert_eq!(io::read_species(&species_path).unwrap(), records);
        let names = io::read_species_names(&species_path).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].latin_name.as_deref(), Some("Panthera leo"));
    }

    #[test]
    fn test_absent_latin_name_survives_as_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("species.csv");

        let stream = LineStream::from_pages(["CITES I / Tiger, IUCN: EN"]);
        let records = SpeciesExtractor::default().extract(&stream).unwrap().records;
        io::write_species(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("1001,Tiger,,EN"));
        assert_eq!(io::read_species(&path).unwrap()[0].latin_name, None);
    }

    #[test]
    fn test_species_table_missing_latin_name_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("species.csv");
        std::fs::write(&path, "UniqueID,English Name\n1001,Lion\n").unwrap();

        match io::read_species_names(&path) {
            Err(Error::MissingColumns { columns, .. }) => assert_eq!(columns, vec!["Latin Name"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_json_species_table_missing_latin_name_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("species.json");
        std::fs::write(
            &path,
            r#"[{"UniqueID": 1001, "English Name": "Lion", "IUCN Status": "VU"}]"#,
        )
        .unwrap();

        match io::read_species_names(&path) {
            Err(Error::MissingColumns { table, columns }) => {
                assert_eq!(table, "species");
                assert_eq!(columns, vec!["Latin Name"]);
            },
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_json_species_table_with_null_latin_name_links() {
        let dir = tempfile::tempdir().unwrap();
        let species_path = dir.path().join("species.json");
        std::fs::write(
            &species_path,
            r#"[
                {"UniqueID": 1001, "English Name": "Tiger", "Latin Name": null, "IUCN Status": "EN"},
                {"UniqueID": 1002, "English Name": "Lion", "Latin Name": "Panthera leo", "IUCN Status": "VU"}
            ]"#,
        )
        .unwrap();

        let names = NameTable::from_names(io::read_species_names(&species_path).unwrap()).unwrap();
        assert_eq!(names.len(), 1);

        let facilities = FacilityTable::from_locations(&facilities()).unwrap();
        let stream = LineStream::from_pages(["Panthera leo\nPL001"]);
        assert_eq!(pairs(&link_species(&stream, &names, &facilities)), vec![(1002, "PL001")]);
    }

    #[test]
    fn test_empty_facility_table_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoos.csv");
        std::fs::write(&path, "Code,X,Y\n").unwrap();

        let rows = io::read_facilities(&path).unwrap();
        assert!(matches!(FacilityTable::from_locations(&rows), Err(Error::EmptyTable(_))));
    }
}
