//! Command line front end for the extraction and linking passes.
//!
//! Usage:
//!   cites_ledger extract listing.txt -o species.csv
//!   cites_ledger link listing.txt --species species.csv --facilities zoos.csv -o links.csv
//!   cites_ledger finalize species_enriched.csv -o species_final.csv
//!
//! `RUST_LOG` controls log output; `-v` lowers the default level to debug.

use cites_ledger::config::ExtractionConfig;
use cites_ledger::enrich::{assign_groups, backfill, BackfillConfig, GroupMapping};
use cites_ledger::extractors::SpeciesExtractor;
use cites_ledger::lines::read_line_stream;
use cites_ledger::linking::{link_species, FacilityTable, NameTable};
use cites_ledger::{io, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cites_ledger", version, about = "Extract and link species listings")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract identified species records from a listing
    Extract {
        /// Listing text (form-feed separated pages), a directory of page
        /// files, or a PDF when built with the `pdf` feature
        input: PathBuf,

        /// Species table to write (.csv or .json)
        #[arg(short, long, default_value = "species.csv")]
        out: PathBuf,

        /// First identifier to assign (overrides the config file)
        #[arg(long)]
        seed: Option<u32>,

        /// JSON file with marker grammar overrides
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Link species to facility codes by replaying the listing
    Link {
        /// The listing the species table was extracted from
        input: PathBuf,

        /// Species table produced by `extract`
        #[arg(long, value_name = "PATH")]
        species: PathBuf,

        /// Facility table with Code, X and Y columns
        #[arg(long, value_name = "PATH")]
        facilities: PathBuf,

        /// Association table to write (.csv or .json)
        #[arg(short, long, default_value = "links.csv")]
        out: PathBuf,
    },

    /// Assign groups and fill missing descriptions/images in an enriched table
    Finalize {
        /// Enriched species table (with Description, Class, Image URL)
        input: PathBuf,

        /// Table to write (.csv or .json)
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract {
            input,
            out,
            seed,
            config,
        } => {
            let mut config = match config {
                Some(path) => ExtractionConfig::from_json_file(path)?,
                None => ExtractionConfig::default(),
            };
            if let Some(seed) = seed {
                config = config.with_starting_id(seed);
            }

            let stream = read_line_stream(&input)?;
            let extraction = SpeciesExtractor::new(&config)?.extract(&stream)?;
            io::write_species(&out, &extraction.records)?;
            println!("Wrote {} species to {}", extraction.records.len(), out.display());
        },
        Command::Link {
            input,
            species,
            facilities,
            out,
        } => {
            let names = NameTable::from_names(io::read_species_names(&species)?)?;
            let facilities = FacilityTable::from_locations(&io::read_facilities(&facilities)?)?;

            let stream = read_line_stream(&input)?;
            let links = link_species(&stream, &names, &facilities);
            io::write_associations(&out, &links)?;
            println!("Wrote {} links to {}", links.len(), out.display());
        },
        Command::Finalize { input, out } => {
            let mut rows = io::read_enriched(&input)?;
            assign_groups(&mut rows, &GroupMapping::default());
            let report = backfill(&mut rows, &BackfillConfig::default());
            io::write_enriched(&out, &rows)?;
            println!(
                "Wrote {} rows to {} ({} descriptions and {} images filled)",
                rows.len(),
                out.display(),
                report.missing_descriptions + report.ambiguous_descriptions,
                report.missing_images
            );
        },
    }
    Ok(())
}
