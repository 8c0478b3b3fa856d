//! String similarity scores on a 0-100 scale.
//!
//! All metrics are symmetric up to floating-point noise, score 100 for
//! identical inputs, and compare `char`s rather than bytes.

use recon_core::enums::SimilarityMetric;
use strsim::{jaro_winkler, normalized_levenshtein};

/// Score `a` against `b` with `metric`.
#[must_use]
pub fn similarity(metric: SimilarityMetric, a: &str, b: &str) -> u8 {
    match metric {
        SimilarityMetric::Indel => indel_ratio(a, b),
        SimilarityMetric::Levenshtein => scale(normalized_levenshtein(a, b)),
        SimilarityMetric::JaroWinkler => scale(jaro_winkler(a, b)),
    }
}

/// `2 * LCS / (|a| + |b|)` as a percentage, rounded half to even.
///
/// LCS is the longest common subsequence, so this is the edit ratio when
/// only insertions and deletions are allowed.
#[must_use]
pub fn indel_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    percent(2 * lcs_len(&a, &b), total)
}

/// Highest [`indel_ratio`] two strings of these lengths can reach.
///
/// Every common subsequence is at most as long as the shorter string, so a
/// candidate whose bound is below the current best can be skipped without
/// changing the result.
#[must_use]
pub fn indel_upper_bound(len_a: usize, len_b: usize) -> u8 {
    let total = len_a + len_b;
    if total == 0 {
        return 100;
    }
    percent(2 * len_a.min(len_b), total)
}

/// `100 * num / den` rounded half to even; `num <= den`.
fn percent(num: usize, den: usize) -> u8 {
    let scaled = 100 * num;
    let quotient = scaled / den;
    let twice_remainder = 2 * (scaled % den);
    let rounded = if twice_remainder > den || (twice_remainder == den && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut row = vec![0usize; short.len() + 1];
    for &x in long {
        for (j, &y) in short.iter().enumerate() {
            row[j + 1] = if x == y {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[short.len()]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}
