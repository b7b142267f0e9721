mod cleaner;
mod document;
mod parser;
mod pii;
mod rdf;
mod scrape;
mod visualize;

use std::fs::File;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use crate::document::Document;
use crate::parser::{DocumentParser, ParsedDocument};
use crate::rdf::RdfConverter;

const DOC_URL: &str =
    "https://eur-lex.europa.eu/legal-content/EN/TXT/HTML/?uri=CELEX:32019R0947&from=en#d1e40-45-1";
const PARSED_JSON_PATH: &str = "data/processed/json_after_parsing";

#[derive(Parser)]
#[command(name = "lexgraph", about = "EUR-Lex regulation scraper and RDF knowledge-graph builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the regulation, parse it, and build the RDF knowledge graph
    Run,
    /// Demonstrate PII masking on a sample legal text
    MaskPii,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run => run_pipeline(),
        Commands::MaskPii => {
            run_pii_example();
            Ok(())
        }
    }
}

/// Scrape, parse, checkpoint to JSON, then convert and visualize.
///
/// Fetch, parse, and checkpoint failures are logged and end the run early
/// with a clean exit; conversion and visualization errors propagate.
fn run_pipeline() -> Result<()> {
    std::fs::create_dir_all("data/processed").context("Failed to create data/processed")?;
    std::fs::create_dir_all("data/output").context("Failed to create data/output")?;

    let mut document = Document::default();

    let html = match scrape::fetch(DOC_URL) {
        Ok(html) => html,
        Err(e) => {
            error!("Failed to fetch content from URL: {}. Error: {:#}", DOC_URL, e);
            return Ok(());
        }
    };
    info!("Successfully fetched and parsed content");

    let parser = DocumentParser::new(&html);
    for failure in parser.populate_metadata(&mut document) {
        warn!("Metadata field {} missing: {}", failure.field, failure.error);
    }
    let outcome = parser.parse_document();
    for failure in &outcome.failures {
        warn!("Field {} degraded to empty: {}", failure.field, failure.error);
    }

    if let Err(e) = save_parsed_record(&outcome.record) {
        error!("Error saving parsed data to JSON: {:#}", e);
        return Ok(());
    }
    info!("Document data saved to JSON successfully");

    run_rdf_conversion(&mut document)
}

/// Reload the checkpointed record, convert it to RDF, and visualize the graph.
fn run_rdf_conversion(document: &mut Document) -> Result<()> {
    let record = match load_parsed_record() {
        Ok(record) => record,
        Err(e) => {
            error!("Error loading JSON data: {:#}", e);
            return Ok(());
        }
    };

    let converter = RdfConverter::new(&record, document)?;
    visualize::visualize(converter.graph())
}

fn save_parsed_record(record: &ParsedDocument) -> Result<()> {
    let file = File::create(PARSED_JSON_PATH)
        .with_context(|| format!("Failed to create {}", PARSED_JSON_PATH))?;
    serde_json::to_writer_pretty(file, record).context("Failed to write parsed record")
}

fn load_parsed_record() -> Result<ParsedDocument> {
    let file = File::open(PARSED_JSON_PATH)
        .with_context(|| format!("Failed to open {}", PARSED_JSON_PATH))?;
    serde_json::from_reader(file).context("Failed to parse checkpointed record")
}

fn run_pii_example() {
    let legal_text = "Hello, my email is example@email.com and my phone is 1234567890.";
    println!("before masking: {}", legal_text);
    let document = pii::LegalDocument::new(legal_text);
    println!("after masking: {}", document.mask_pii());
}
