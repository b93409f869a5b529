//! Body text reduction for the preprocess module
//!
//! Strips the element kinds that never carry product content (scripts,
//! styles, noscript fallbacks, inline frames, vector graphics) and
//! linearizes the remaining text nodes, then cuts the result down to a
//! fixed character budget.

use crate::preprocess::Document;
use scraper::ElementRef;

/// Maximum number of characters of reduced body text
pub const CONTENT_BUDGET: usize = 10_000;

/// Marker appended when the body text exceeds the content budget
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Element kinds whose entire subtree is removed
const REMOVED_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "iframe", "svg"];

/// Reduce a document to its visible body text
///
/// Removal has decompose semantics: an element of a removed kind is
/// skipped together with its entire subtree, at any nesting depth. The
/// walk never mutates the caller's tree. Remaining text nodes are trimmed
/// per node and joined with newlines, then cut to [`CONTENT_BUDGET`]
/// characters with [`TRUNCATION_MARKER`] appended when over budget.
/// The cut counts characters, not words or sentences.
///
/// # Arguments
///
/// * `document` - The parsed document
///
/// # Returns
///
/// The reduced, budget-bounded text
pub fn reduce_content(document: &Document) -> String {
    let mut pieces = Vec::new();
    collect_text(document.tree().root_element(), &mut pieces);
    truncate_to_budget(pieces.join("\n"))
}

fn collect_text(element: ElementRef, pieces: &mut Vec<String>) {
    if REMOVED_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, pieces);
        }
    }
}

/// Cut text to exactly [`CONTENT_BUDGET`] characters when over budget
///
/// The cut never splits a code point; text at or under the budget passes
/// through unchanged.
fn truncate_to_budget(text: String) -> String {
    match text.char_indices().nth(CONTENT_BUDGET) {
        Some((byte_index, _)) => {
            let mut cut = text[..byte_index].to_string();
            cut.push_str(TRUNCATION_MARKER);
            cut
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_non_content_elements() {
        let html = r#"
        <html>
            <script>var x = 1;</script>
            <style>.foo { color: red; }</style>
            <body>
                <p>Visible content</p>
                <noscript>No JS fallback</noscript>
                <iframe src="https://example.com/frame"></iframe>
                <svg><text>vector text</text></svg>
            </body>
        </html>
        "#;
        let document = Document::parse(html);
        let result = reduce_content(&document);
        assert!(result.contains("Visible content"));
        assert!(!result.contains("var x = 1"));
        assert!(!result.contains("color: red"));
        assert!(!result.contains("No JS fallback"));
        assert!(!result.contains("vector text"));
    }

    #[test]
    fn test_removes_nested_subtrees() {
        // Removal is decompose: the whole subtree goes, at any depth
        let html = r#"
        <html><body>
            <div>
                <noscript><div><p>deeply <b>nested</b> fallback</p></div></noscript>
                <p>kept</p>
            </div>
        </body></html>
        "#;
        let document = Document::parse(html);
        let result = reduce_content(&document);
        assert!(result.contains("kept"));
        assert!(!result.contains("nested"));
        assert!(!result.contains("fallback"));
    }

    #[test]
    fn test_text_nodes_joined_with_newlines() {
        let html = "<html><body><p>  first  </p><p>second</p></body></html>";
        let document = Document::parse(html);
        let result = reduce_content(&document);
        assert_eq!(result, "first\nsecond");
    }

    #[test]
    fn test_truncates_long_content() {
        let html = format!("<html><body>{}</body></html>", "x".repeat(15_000));
        let document = Document::parse(&html);
        let result = reduce_content(&document);
        assert_eq!(
            result.chars().count(),
            CONTENT_BUDGET + TRUNCATION_MARKER.chars().count()
        );
        assert!(result.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_exact_budget_not_truncated() {
        let html = format!("<html><body>{}</body></html>", "x".repeat(CONTENT_BUDGET));
        let document = Document::parse(&html);
        let result = reduce_content(&document);
        assert_eq!(result.chars().count(), CONTENT_BUDGET);
        assert!(!result.contains("[truncated]"));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // Multibyte characters still cut at the character budget
        let html = format!("<html><body>{}</body></html>", "é".repeat(12_000));
        let document = Document::parse(&html);
        let result = reduce_content(&document);
        assert_eq!(
            result.chars().count(),
            CONTENT_BUDGET + TRUNCATION_MARKER.chars().count()
        );
    }
}
