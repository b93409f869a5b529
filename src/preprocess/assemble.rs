//! Payload assembly for the preprocess module
//!
//! Merges the structured signals, the meta index and the reduced body
//! text into one bounded payload string, in a fixed section order, and
//! estimates its token cost.

use crate::preprocess::error::PreprocessError;
use crate::preprocess::structured::{MetaIndex, StructuredSignal};

/// Heading for the structured-data section
const JSON_LD_HEADING: &str = "JSON-LD Data";

/// Heading for the meta-tags section
const META_HEADING: &str = "\nMeta Tags";

/// Heading for the page-content section
const CONTENT_HEADING: &str = "\nPage Content";

/// The single assembled text payload sent to the extraction boundary
#[derive(Debug, Clone)]
pub struct Payload {
    /// The assembled text
    pub text: String,

    /// Estimated token cost of the text
    pub estimated_tokens: usize,
}

/// Assemble a payload from the preprocessing outputs
///
/// Sections are emitted in fixed order: structured signals, meta index,
/// then reduced content. The first two sections appear only when
/// non-empty; the content section is always emitted. JSON sections are
/// serialized with 2-space indentation, which is part of the payload's
/// token-cost profile.
///
/// # Arguments
///
/// * `signals` - The decoded JSON-LD fragments
/// * `meta` - The meta tag index
/// * `content` - The reduced body text
///
/// # Returns
///
/// The payload with its token-cost estimate
pub fn assemble(
    signals: &StructuredSignal,
    meta: &MetaIndex,
    content: &str,
) -> Result<Payload, PreprocessError> {
    let mut parts: Vec<String> = Vec::new();

    if !signals.is_empty() {
        parts.push(JSON_LD_HEADING.to_string());
        parts.push(serde_json::to_string_pretty(signals)?);
    }

    if !meta.is_empty() {
        parts.push(META_HEADING.to_string());
        parts.push(serde_json::to_string_pretty(meta)?);
    }

    parts.push(CONTENT_HEADING.to_string());
    parts.push(content.to_string());

    let text = parts.join("\n");
    let estimated_tokens = estimate_tokens(&text);

    Ok(Payload {
        text,
        estimated_tokens,
    })
}

/// Estimate the token cost of a text
///
/// Rough approximation of one token per four characters, rounded toward
/// zero. Used purely for cost accounting, never for truncation decisions.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
