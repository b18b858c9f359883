//! String-distance features between a misspelling and a candidate correction.

use serde::{Deserialize, Serialize};

/// Number of features in a [`FeatureVector`].
pub const NUM_FEATURES: usize = 4;

/// Similarity summary of two words, used as reranker input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn damerau_levenshtein(&self) -> f64 {
        self.0[0]
    }

    pub fn hamming(&self) -> f64 {
        self.0[1]
    }

    pub fn jaro_winkler(&self) -> f64 {
        self.0[2]
    }

    pub fn lcs_length(&self) -> f64 {
        self.0[3]
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Compute `[damerau_levenshtein, hamming, jaro_winkler, lcs_length]` between two words.
///
/// The edit distance is the restricted Damerau-Levenshtein distance (optimal
/// string alignment): no substring is edited more than once.
pub fn extract_features(erroneous: &str, candidate: &str) -> FeatureVector {
    FeatureVector([
        strsim::osa_distance(erroneous, candidate) as f64,
        hamming_distance(erroneous, candidate) as f64,
        strsim::jaro_winkler(erroneous, candidate),
        lcs_length(erroneous, candidate) as f64,
    ])
}

/// Hamming distance that also accepts strings of different lengths.
///
/// Positions past the end of the shorter string count as mismatches, so
/// `hamming_distance("cat", "cats") == 1`.
pub fn hamming_distance(a: &str, b: &str) -> usize {
    match strsim::hamming(a, b) {
        Ok(distance) => distance,
        Err(_) => {
            let len_a = a.chars().count();
            let len_b = b.chars().count();
            let mismatches = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
            mismatches + len_a.abs_diff(len_b)
        }
    }
}

/// Length of the longest common subsequence of two strings, in chars.
#[allow(clippy::needless_range_loop)]
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() || b_chars.is_empty() {
        return 0;
    }

    // Two rows are enough: row i only depends on row i - 1.
    let mut prev_row = vec![0; b_chars.len() + 1];
    let mut curr_row = vec![0; b_chars.len() + 1];

    for i in 1..=a_chars.len() {
        for j in 1..=b_chars.len() {
            curr_row[j] = if a_chars[i - 1] == b_chars[j - 1] {
                prev_row[j - 1] + 1
            } else {
                prev_row[j].max(curr_row[j - 1])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}
