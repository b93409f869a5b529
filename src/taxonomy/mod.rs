//! Category taxonomy module
//!
//! This module owns the closed vocabulary of canonical category paths and
//! validates free-text categories against it. The taxonomy is loaded once,
//! immutable afterwards, and cheap to share read-only across workers.
//!
//! Validation is exact-first: a string already in the taxonomy passes
//! unchanged. Otherwise the closest entry by matching-subsequence ratio is
//! accepted when it scores at least [`MATCH_THRESHOLD`]; ties are broken
//! by taxonomy load order (the first entry reaching the maximum score
//! wins, which is this implementation's documented contract).

mod error;
mod matcher;

pub use error::TaxonomyError;
pub use matcher::similarity;

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Minimum similarity score for an approximate category match
pub const MATCH_THRESHOLD: f64 = 0.6;

/// A category guaranteed to be a member of the taxonomy it was
/// validated against
///
/// Instances can only be produced by [`Taxonomy::validate`], so holding a
/// `Category` is proof of membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
}

impl Category {
    /// The canonical category path
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The closed set of canonical category path strings
#[derive(Debug, Clone)]
pub struct Taxonomy {
    /// Entries in load order, used for deterministic approximate matching
    entries: Vec<String>,

    /// Membership index for exact lookups
    index: HashSet<String>,
}

impl Taxonomy {
    /// Build a taxonomy from an iterator of canonical category paths
    ///
    /// Duplicates are dropped, keeping the first occurrence. An empty
    /// taxonomy is a configuration error: with no vocabulary every
    /// category would be rejected, so the problem is surfaced at load
    /// time instead.
    pub fn new(entries: impl IntoIterator<Item = String>) -> Result<Self, TaxonomyError> {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();

        for entry in entries {
            if index.insert(entry.clone()) {
                ordered.push(entry);
            }
        }

        if ordered.is_empty() {
            return Err(TaxonomyError::Empty {
                path: Path::new("<memory>").to_path_buf(),
            });
        }

        Ok(Self {
            entries: ordered,
            index,
        })
    }

    /// Load a taxonomy from a line-oriented file
    ///
    /// One canonical category path per line; blank lines and lines
    /// starting with `#` are ignored. An absent file or a file with no
    /// usable entries is a configuration error.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TaxonomyError::Empty {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(TaxonomyError::Io(e)),
        };

        let entries: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        if entries.is_empty() {
            return Err(TaxonomyError::Empty {
                path: path.to_path_buf(),
            });
        }

        debug!("Loaded {} taxonomy entries from {}", entries.len(), path.display());
        Self::new(entries)
    }

    /// Number of canonical entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the taxonomy has no entries (never true post-construction)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact membership check
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// Validate a free-text category against the taxonomy
    ///
    /// Exact members pass unchanged. Otherwise the best approximate match
    /// with similarity of at least [`MATCH_THRESHOLD`] is returned; ties
    /// are broken by load order, first entry at the maximum score wins.
    ///
    /// # Arguments
    ///
    /// * `input` - The free-text category
    ///
    /// # Returns
    ///
    /// The validated category, or an invalid-category error naming the
    /// original input
    pub fn validate(&self, input: &str) -> Result<Category, TaxonomyError> {
        if self.index.contains(input) {
            return Ok(Category {
                name: input.to_string(),
            });
        }

        let mut best: Option<(&str, f64)> = None;
        for entry in &self.entries {
            let score = similarity(input, entry);
            if score >= MATCH_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((name, score)) => {
                debug!(
                    "Approximate category match: '{}' -> '{}' (score {:.3})",
                    input, name, score
                );
                Ok(Category {
                    name: name.to_string(),
                })
            }
            None => Err(TaxonomyError::InvalidCategory {
                input: input.to_string(),
            }),
        }
    }
}
