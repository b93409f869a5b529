//! Document preprocessing module
//!
//! This module turns one page of raw product markup into a single bounded
//! text payload, ready for the generative extraction boundary. It pulls
//! the high-signal structured fragments (JSON-LD blocks, meta tags, page
//! title) out of the tree, reduces the remaining body text under a fixed
//! content budget, and assembles everything in a deterministic section
//! order together with a token-cost estimate.

mod assemble;
mod error;
mod reduce;
mod structured;

pub use assemble::{Payload, assemble, estimate_tokens};
pub use error::PreprocessError;
pub use reduce::{CONTENT_BUDGET, TRUNCATION_MARKER, reduce_content};
pub use structured::{MetaIndex, StructuredSignal, extract_json_ld, extract_meta_index};

use scraper::Html;

/// An immutable parsed markup document
///
/// Parsing is best-effort and tolerant: unterminated tags, stray text and
/// other malformed input never fail. No network or external resources are
/// fetched during parsing.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a markup string into a document tree
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Access the underlying tree
    pub(crate) fn tree(&self) -> &Html {
        &self.html
    }
}

/// Preprocess one page of markup into a bounded payload
///
/// # Arguments
///
/// * `markup` - The raw page markup
///
/// # Returns
///
/// The assembled payload with its token-cost estimate
pub fn preprocess(markup: &str) -> Result<Payload, PreprocessError> {
    let document = Document::parse(markup);

    let signals = extract_json_ld(&document)?;
    let meta = extract_meta_index(&document)?;
    let content = reduce_content(&document);

    assemble(&signals, &meta, &content)
}
