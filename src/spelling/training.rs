//! Construction of reranker training data from (misspelling, correction) pairs.
//!
//! Every usable pair yields one positive row (features between the misspelling
//! and its true correction) and one negative row (features between the
//! misspelling and the first suggestion that is not the true correction).

use serde::{Deserialize, Serialize};

use crate::spelling::features::{FeatureVector, extract_features};

/// Label of the row built from the true correction.
pub const POSITIVE_LABEL: u8 = 1;
/// Label of the row built from a wrong suggestion.
pub const NEGATIVE_LABEL: u8 = 0;

/// What to do with a pair whose suggestions contain no wrong candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Drop the pair entirely: no positive and no negative row.
    #[default]
    SkipPair,
    /// Keep the positive row even though no negative exists.
    KeepPositive,
}

/// First suggestion that differs from the true correction.
pub fn select_negative<'a>(suggestions: &'a [String], correct: &str) -> Option<&'a str> {
    suggestions
        .iter()
        .map(String::as_str)
        .find(|&suggestion| suggestion != correct)
}

/// Feature matrix and labels for the reranker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    features: Vec<FeatureVector>,
    labels: Vec<u8>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a labelled row.
    pub fn push(&mut self, features: FeatureVector, label: u8) {
        self.features.push(features);
        self.labels.push(label);
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows labelled [`POSITIVE_LABEL`].
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l == POSITIVE_LABEL).count()
    }

    /// Number of rows labelled [`NEGATIVE_LABEL`].
    pub fn negatives(&self) -> usize {
        self.len() - self.positives()
    }
}

/// Counts of how each pair was used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSetReport {
    /// Pairs offered to the builder.
    pub pairs_seen: usize,
    /// Pairs that produced both a positive and a negative row.
    pub pairs_used: usize,
    /// Pairs without a wrong suggestion.
    pub pairs_without_negative: usize,
    /// Pairs without a wrong suggestion whose positive row was kept anyway.
    pub positives_without_negative: usize,
}

/// Incremental builder for a [`TrainingSet`].
#[derive(Debug, Clone, Default)]
pub struct TrainingSetBuilder {
    policy: SkipPolicy,
    set: TrainingSet,
    report: TrainingSetReport,
}

impl TrainingSetBuilder {
    pub fn new(policy: SkipPolicy) -> Self {
        TrainingSetBuilder {
            policy,
            ..Default::default()
        }
    }

    /// Add one pair given the suggestions produced for its misspelling.
    ///
    /// Returns the number of rows added.
    pub fn add_pair(&mut self, erroneous: &str, correct: &str, suggestions: &[String]) -> usize {
        self.report.pairs_seen += 1;

        match select_negative(suggestions, correct) {
            Some(negative) => {
                self.set
                    .push(extract_features(erroneous, negative), NEGATIVE_LABEL);
                self.set
                    .push(extract_features(erroneous, correct), POSITIVE_LABEL);
                self.report.pairs_used += 1;
                2
            }
            None => {
                self.report.pairs_without_negative += 1;
                match self.policy {
                    SkipPolicy::SkipPair => 0,
                    SkipPolicy::KeepPositive => {
                        self.set
                            .push(extract_features(erroneous, correct), POSITIVE_LABEL);
                        self.report.positives_without_negative += 1;
                        1
                    }
                }
            }
        }
    }

    /// Rows collected so far.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn finish(self) -> (TrainingSet, TrainingSetReport) {
        (self.set, self.report)
    }
}
