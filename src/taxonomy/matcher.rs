//! # Approximate String Matching Module
//!
//! This module scores how closely a free-text category resembles a
//! canonical taxonomy entry. The score is the classic matching-subsequence
//! ratio: recursively find the longest common contiguous block between the
//! two strings, then the longest blocks to its left and right, and so on;
//! the ratio is `2 * M / T` where `M` is the total matched length and `T`
//! the combined length of both strings.
//!
//! ## Properties
//!
//! - Symmetric in value: `similarity(a, b) == similarity(b, a)`
//! - 1.0 for identical strings, 0.0 for strings with no characters in
//!   common, and 1.0 for two empty strings
//! - Deterministic: among equally long blocks the earliest occurrence
//!   (smallest start in `a`, then in `b`) is chosen

use std::collections::HashMap;

/// A maximal matching block between two character sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Match {
    /// Start of the block in the first sequence
    a_start: usize,
    /// Start of the block in the second sequence
    b_start: usize,
    /// Length of the block
    len: usize,
}

/// Score the similarity of two strings on a 0.0 - 1.0 scale
///
/// # Arguments
///
/// * `a` - The first string
/// * `b` - The second string
///
/// # Returns
///
/// The matching-subsequence ratio `2 * M / T`
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    // Positions of every character in b, in ascending order
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b_positions.entry(*ch).or_default().push(j);
    }

    let matched = matched_total(&a, &b_positions, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Total length of all maximal matching blocks between `a[alo..ahi]` and
/// `b[blo..bhi]`, found by recursing on both sides of the longest block
fn matched_total(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> usize {
    let best = longest_match(a, b_positions, alo, ahi, blo, bhi);
    if best.len == 0 {
        return 0;
    }

    best.len
        + matched_total(a, b_positions, alo, best.a_start, blo, best.b_start)
        + matched_total(
            a,
            b_positions,
            best.a_start + best.len,
            ahi,
            best.b_start + best.len,
            bhi,
        )
}

/// Find the longest contiguous matching block between `a[alo..ahi]` and
/// `b[blo..bhi]`
///
/// Classic dynamic scan: `lengths[j]` holds the length of the match
/// ending at `a[i]` / `b[j]`; a strictly-greater comparison keeps the
/// earliest maximal block.
fn longest_match(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Match {
    let mut best = Match {
        a_start: alo,
        b_start: blo,
        len: 0,
    };
    let mut lengths: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut new_lengths: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_positions.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = if j == 0 {
                    1
                } else {
                    lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                new_lengths.insert(j, len);
                if len > best.len {
                    best = Match {
                        a_start: i + 1 - len,
                        b_start: j + 1 - len,
                        len,
                    };
                }
            }
        }
        lengths = new_lengths;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity("pants", "pants"), 1.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // Blocks: "bcd" -> M = 3, T = 8, ratio = 0.75
        let score = similarity("abcd", "bcde");
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_value() {
        let forward = similarity("Apparel & Accessories", "Apparel and Accessories");
        let backward = similarity("Apparel and Accessories", "Apparel & Accessories");
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_single_trailing_difference() {
        // 39 of 40 characters match: 2*39 / 79
        let a = "Apparel & Accessories > Clothing > Pant";
        let b = "Apparel & Accessories > Clothing > Pants";
        let score = similarity(a, b);
        assert!((score - 78.0 / 79.0).abs() < 1e-9);
    }

    #[test]
    fn test_multibyte_characters() {
        let score = similarity("café", "cafe");
        assert!((score - 0.75).abs() < 1e-9);
    }
}
