use std::fs::File;

use anyhow::{Context, Result};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, NamedNode, Triple};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::info;

use crate::document::{ArticleRecord, Document};
use crate::parser::ParsedDocument;

/// The document node every article links back to.
pub const DOCUMENT_URI: &str = "http://example.org/document/";

const CDM_NS: &str = "http://publications.europa.eu/ontology/cdm#";
const SCHEMA_NS: &str = "http://schema.org/";
const ELI_NS: &str = "http://data.europa.eu/eli/ontology#";
const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

const METADATA_PATH: &str = "data/output/document_metadata.json";

/// Everything not unreserved in a URI path segment gets percent-encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Converts the parsed record into an RDF graph.
///
/// Construction is deliberately not side-effect-free: it builds the full
/// graph, appends one derived row per article to the shared [`Document`], and
/// persists the document snapshot to `data/output/document_metadata.json`.
pub struct RdfConverter {
    graph: Graph,
}

impl RdfConverter {
    pub fn new(record: &ParsedDocument, document: &mut Document) -> Result<Self> {
        let graph = build_graph(record, document)?;

        let file = File::create(METADATA_PATH)
            .with_context(|| format!("Failed to create {}", METADATA_PATH))?;
        serde_json::to_writer_pretty(file, document)
            .context("Failed to write document metadata")?;
        info!("Saved document metadata to {}", METADATA_PATH);

        Ok(Self { graph })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

/// Emit the two document-level triples plus three triples per article, and
/// append the derived article rows to the shared record.
pub fn build_graph(record: &ParsedDocument, document: &mut Document) -> Result<Graph> {
    info!("Converting parsed record to RDF");
    let mut graph = Graph::default();
    let doc = NamedNode::new(DOCUMENT_URI)?;

    let language = document
        .meta_data
        .get("language")
        .context("Document metadata has no language")?;
    let title = document
        .meta_data
        .get("title_document")
        .context("Document metadata has no title_document")?;

    graph.insert(&Triple::new(
        doc.clone(),
        NamedNode::new(format!("{CDM_NS}language"))?,
        Literal::new_simple_literal(language),
    ));
    // The bare schema.org namespace as the title predicate, as the source
    // ontology has it.
    graph.insert(&Triple::new(
        doc.clone(),
        NamedNode::new(SCHEMA_NS)?,
        Literal::new_simple_literal(title),
    ));

    let article_type = NamedNode::new(format!("{SCHEMA_NS}Article"))?;
    let subdivision_type = NamedNode::new(format!("{ELI_NS}SubdivisionType"))?;
    let is_part_of = NamedNode::new(format!("{DCTERMS_NS}isPartOf"))?;

    for article in &record.article {
        let uri = article_uri(&article.article_number);
        let node = NamedNode::new(uri.clone())
            .with_context(|| format!("Article number {:?} produced an invalid URI", article.article_number))?;

        document.data.push(ArticleRecord {
            article_number: article.article_number.clone(),
            article_name: article.article_name.clone(),
            article_text: article.data.join(" "),
            uri: percent_decode_str(&uri)
                .decode_utf8()
                .context("Article URI is not valid UTF-8 after decoding")?
                .into_owned(),
        });

        graph.insert(&Triple::new(node.clone(), rdf::TYPE, article_type.clone()));
        graph.insert(&Triple::new(
            node.clone(),
            subdivision_type.clone(),
            Literal::new_typed_literal("Article", xsd::STRING),
        ));
        graph.insert(&Triple::new(node, is_part_of.clone(), doc.clone()));
    }
    info!("Finished adding {} articles to the RDF graph", record.article.len());

    Ok(graph)
}

/// Article URI: document URI + `article/` + the percent-encoded article
/// number, whose spaces are first replaced by a literal `%` marker
/// (`Article 1` → `…/article/Article%251`).
fn article_uri(article_number: &str) -> String {
    let slug = article_number.replace(' ', "%");
    format!("{}article/{}", DOCUMENT_URI, utf8_percent_encode(&slug, SEGMENT))
}

// ── Tests ──
