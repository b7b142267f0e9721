use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::info;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w\.-]+@[\w\.-]+").unwrap());
// Two groups of 1-3 digits with optional separators, then 4 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}[-.\s]?){2}\d{4}").unwrap());

const EMAIL_MARKER: &str = "***MASKED EMAIL***";
const PHONE_MARKER: &str = "***MASKED PHONE***";

/// Mask email addresses and phone-shaped digit groups. Anything not matching
/// the two patterns passes through untouched.
pub fn mask_pii(text: &str) -> String {
    let masked = EMAIL_RE.replace_all(text, EMAIL_MARKER);
    PHONE_RE.replace_all(&masked, PHONE_MARKER).into_owned()
}

/// A free-text legal document with fixed metadata and PII masking.
pub struct LegalDocument {
    text: String,
    metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub date_created: NaiveDate,
}

impl LegalDocument {
    pub fn new(text: impl Into<String>) -> Self {
        info!("Legal document created");
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                title: "Legal Document".to_string(),
                author: "Your Name".to_string(),
                date_created: NaiveDate::from_ymd_opt(2023, 8, 22).unwrap(),
            },
        }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Masked copy of the document text.
    pub fn mask_pii(&self) -> String {
        info!("Masking PII data in the document");
        mask_pii(&self.text)
    }
}

// ── Tests ──
