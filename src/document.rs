use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shared state for one pipeline run: metadata written by the parser,
/// derived per-article rows appended by the RDF converter.
///
/// Created once in `main` and passed by mutable reference to both writers.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    pub meta_data: BTreeMap<String, String>,
    pub data: Vec<ArticleRecord>,
}

/// One article as derived during RDF conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub article_number: String,
    pub article_name: String,
    pub article_text: String,
    pub uri: String,
}
