//! Structured signal extraction for the preprocess module
//!
//! Pulls the machine-readable fragments out of a page: JSON-LD script
//! blocks, meta tags and the page title. These carry far more signal per
//! character than the visible body text, so they are extracted verbatim
//! before the body is reduced.

use crate::preprocess::Document;
use crate::preprocess::error::PreprocessError;
use scraper::Selector;
use std::collections::BTreeMap;
use tracing::debug;

/// An ordered sequence of JSON-decodable fragments found in JSON-LD
/// script elements
pub type StructuredSignal = Vec<serde_json::Value>;

/// A mapping from a meta tag identifier (`name` or `property`, plus the
/// synthetic `"title"` key for the page title) to its content value
pub type MetaIndex = BTreeMap<String, String>;

/// Extract every JSON-LD fragment from a document
///
/// Each `<script type="application/ld+json">` element is decoded
/// independently; a fragment that fails to decode is dropped and never
/// fails the whole extraction.
///
/// # Arguments
///
/// * `document` - The parsed document
///
/// # Returns
///
/// The decoded fragments in document order, possibly empty
pub fn extract_json_ld(document: &Document) -> Result<StructuredSignal, PreprocessError> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#)
        .map_err(|e| PreprocessError::SelectorParse(e.to_string()))?;

    let mut fragments = Vec::new();
    for element in document.tree().select(&selector) {
        let raw = element.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => fragments.push(value),
            Err(e) => {
                debug!("Skipping malformed JSON-LD fragment: {}", e);
            }
        }
    }

    Ok(fragments)
}

/// Extract the meta tag index and page title from a document
///
/// A meta tag is recorded only when both its identifier (`name`, falling
/// back to `property`) and its `content` attribute are present and
/// non-empty. Keys are case-sensitive as authored; the last-seen value
/// wins on duplicates. The page title is inserted under the key `"title"`
/// after the meta pass, so it overwrites any authored `title` meta tag.
///
/// # Arguments
///
/// * `document` - The parsed document
///
/// # Returns
///
/// The meta index, possibly empty
pub fn extract_meta_index(document: &Document) -> Result<MetaIndex, PreprocessError> {
    let meta_selector =
        Selector::parse("meta").map_err(|e| PreprocessError::SelectorParse(e.to_string()))?;
    let title_selector =
        Selector::parse("title").map_err(|e| PreprocessError::SelectorParse(e.to_string()))?;

    let mut index = MetaIndex::new();

    for element in document.tree().select(&meta_selector) {
        let name = element
            .value()
            .attr("name")
            .filter(|v| !v.is_empty())
            .or_else(|| element.value().attr("property").filter(|v| !v.is_empty()));
        let content = element.value().attr("content").filter(|v| !v.is_empty());

        if let (Some(name), Some(content)) = (name, content) {
            index.insert(name.to_string(), content.to_string());
        }
    }

    // Title is taken once, from the first title element, and inserted
    // after the meta pass so it wins any key collision.
    if let Some(title) = document.tree().select(&title_selector).next() {
        let text = title.text().collect::<String>();
        index.insert("title".to_string(), text.trim().to_string());
    }

    Ok(index)
}
