//! Near-duplicate detection for user turns.
//!
//! Texts are normalized (case-folded, punctuation stripped, whitespace
//! collapsed) and compared first for exact equality, then by a
//! longest-matching-blocks similarity ratio. The ratio is 2M / (len a +
//! len b) where M is the total length of the common blocks found by
//! repeatedly taking the longest common block and recursing into the
//! unmatched regions on either side.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Similarity at or above this ratio counts as a repeat.
pub const REPEAT_SIMILARITY: f64 = 0.93;

static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern compiles"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Normalizes text for comparison: case-fold, punctuation to spaces,
/// whitespace collapsed, trimmed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let depunctuated = NON_WORD_RE.replace_all(&lowered, " ");
    WHITESPACE_RE
        .replace_all(&depunctuated, " ")
        .trim()
        .to_string()
}

/// Returns true when two texts are effectively the same turn.
pub fn is_repeat(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return true;
    }
    similarity_ratio(&a, &b) >= REPEAT_SIMILARITY
}

/// Longest-matching-blocks similarity of two strings, in [0, 1].
///
/// Both empty counts as identical (1.0). Callers normalize first; this
/// function compares exactly what it is given.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let combined_len = a.len() + b.len();
    if combined_len == 0 {
        return 1.0;
    }
    (2.0 * matched_total(&a, &b) as f64) / combined_len as f64
}

/// Total length of common blocks: take the longest common block, then
/// recurse into the regions before and after it on both sides.
fn matched_total(a: &[char], b: &[char]) -> usize {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_positions.entry(ch).or_default().push(j);
    }

    let mut total = 0;
    let mut regions = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(a, &b_positions, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            regions.push((alo, i, blo, j));
            regions.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Finds the longest block common to `a[alo..ahi]` and `b[blo..bhi]`,
/// returning its start in each string and its length.
///
/// For each position in `a`, chain lengths ending at each `b` position are
/// extended from the previous row; the earliest longest block wins ties.
fn longest_match(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // chain_lengths[j] = length of the common block ending at a[i], b[j]
    let mut chain_lengths: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_chain_lengths: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_positions.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let length = if j == 0 {
                    1
                } else {
                    chain_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next_chain_lengths.insert(j, length);
                if length > best_size {
                    best_i = i + 1 - length;
                    best_j = j + 1 - length;
                    best_size = length;
                }
            }
        }
        chain_lengths = next_chain_lengths;
    }

    (best_i, best_j, best_size)
}
