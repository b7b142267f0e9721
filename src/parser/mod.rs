pub mod extract;

use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;

/// Fixed URI recorded in the document metadata.
const METADATA_URI: &str = "https://example.com/document";

/// A per-field extraction failure. Extraction degrades field by field: a
/// missing element empties that field only and the parse carries on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no element matched selector {selector}")]
    Missing { selector: &'static str },
}

/// Which field degraded, and why.
#[derive(Debug)]
pub struct FieldFailure {
    pub field: &'static str,
    pub error: ExtractError,
}

/// One extracted article. Number and name come from the headings inside the
/// article's container div; `data` is the cleaned, space-joined body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_number: String,
    pub article_name: String,
    pub data: Vec<String>,
}

/// The structured record checkpointed to JSON between the parse and convert
/// phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub article: Vec<Article>,
    pub notes: Vec<String>,
    pub titles: Vec<String>,
    pub signature: Option<String>,
    pub annex: Vec<String>,
    pub treaty_rules: Vec<String>,
}

pub struct ParseOutcome {
    pub record: ParsedDocument,
    pub failures: Vec<FieldFailure>,
}

/// Extracts the structured record from a fetched page.
pub struct DocumentParser<'a> {
    html: &'a Html,
}

impl<'a> DocumentParser<'a> {
    pub fn new(html: &'a Html) -> Self {
        Self { html }
    }

    /// Write language, published date, and title into the shared record.
    /// Fields that are present are written even when others are missing;
    /// the fixed `uri` entry is always set.
    pub fn populate_metadata(&self, document: &mut Document) -> Vec<FieldFailure> {
        let mut failures = Vec::new();

        match extract::language(self.html) {
            Ok(v) => {
                document.meta_data.insert("language".into(), v);
            }
            Err(error) => failures.push(FieldFailure { field: "language", error }),
        }
        match extract::published_date(self.html) {
            Ok(v) => {
                document.meta_data.insert("published_date".into(), v);
            }
            Err(error) => failures.push(FieldFailure { field: "published_date", error }),
        }
        match extract::title(self.html) {
            Ok(v) => {
                document.meta_data.insert("title_document".into(), v);
            }
            Err(error) => failures.push(FieldFailure { field: "title_document", error }),
        }
        document.meta_data.insert("uri".into(), METADATA_URI.into());

        failures
    }

    /// Run every extractor and aggregate the results. Cannot fail as a whole:
    /// each fallible field degrades to empty/absent and is reported in
    /// `failures`.
    pub fn parse_document(&self) -> ParseOutcome {
        let mut failures = Vec::new();

        let signature = match extract::signature(self.html) {
            Ok(s) => Some(s),
            Err(error) => {
                failures.push(FieldFailure { field: "signature", error });
                None
            }
        };
        let treaty_rules = match extract::treaty_rules(self.html) {
            Ok(v) => v,
            Err(error) => {
                failures.push(FieldFailure { field: "treaty_rules", error });
                Vec::new()
            }
        };

        let record = ParsedDocument {
            article: extract::articles(self.html),
            notes: extract::notes(self.html),
            titles: extract::titles(self.html),
            signature,
            annex: extract::annexes(self.html),
            treaty_rules,
        };

        ParseOutcome { record, failures }
    }
}

// ── Tests ──
