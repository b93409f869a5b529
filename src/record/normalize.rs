//! Text cleaning and URL repair for extracted records
//!
//! Model output tends to carry encoding artifacts and inconsistent
//! whitespace, and product pages routinely emit scheme-relative asset
//! URLs. These helpers clean both up deterministically.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of carriage-return line breaks (CRLF or bare CR)
static CR_BREAK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\r\n|\r)+").expect("valid regex"));

/// Runs of horizontal whitespace
static HORIZONTAL_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Padding around a line break
static BREAK_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\n[ \t]*").expect("valid regex"));

/// Three or more consecutive line breaks
static EXCESS_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// A leading list-dash marker with extra spacing
static DASH_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-[ \t]+").expect("valid regex"));

/// Clean an extracted text field
///
/// Removes Unicode replacement characters, collapses CR/CRLF break runs
/// to a single line feed, collapses horizontal whitespace runs to one
/// space, strips padding around line breaks, clamps three-or-more
/// consecutive breaks to exactly two, normalizes a leading `- ` list
/// marker to a single space after the dash, and trims the whole string.
///
/// Callers with optional fields map over them, so an absent value passes
/// through untouched.
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\u{FFFD}', "");
    let text = CR_BREAK_RUNS.replace_all(&text, "\n");
    let text = HORIZONTAL_RUNS.replace_all(&text, " ");
    let text = BREAK_PADDING.replace_all(&text, "\n");
    let text = EXCESS_BREAKS.replace_all(&text, "\n\n");
    let text = DASH_MARKER.replace_all(&text, "- ");
    text.trim().to_string()
}

/// Repair a scheme-relative URL
///
/// URLs beginning with `//` inherit the page scheme; they are rewritten
/// with an explicit `https:` prefix. Everything else, including already
/// absolute URLs and empty strings, passes through unchanged.
pub fn fix_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}
