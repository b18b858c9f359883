//! Spellchecker that generates candidates from a dictionary and reranks them
//! with a trained classifier.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::{BinaryClassifier, ClassifierConfig, GradientBoostedClassifier};
use crate::spelling::dictionary::CandidateSource;
use crate::spelling::features::{FeatureVector, extract_features};
use crate::spelling::training::TrainingSet;

/// Probabilities of each candidate being the correct spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScores {
    /// `[P(wrong), P(correct)]` per candidate.
    pub probabilities: Vec<[f64; 2]>,
    /// Candidates in suggester order. Holds a single `None` when the
    /// suggester had nothing to offer.
    pub candidates: Vec<Option<String>>,
}

impl CandidateScores {
    /// Placeholder returned for words without suggestions.
    pub fn empty() -> Self {
        CandidateScores {
            probabilities: vec![[0.0, 0.0]],
            candidates: vec![None],
        }
    }

    /// Whether this is the no-suggestion placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.candidates.iter().all(Option::is_none)
    }

    /// Candidates sorted by descending probability of being correct.
    ///
    /// Ties keep suggester order. The placeholder yields an empty list.
    pub fn ranked(&self) -> Vec<String> {
        let mut order: Vec<usize> = (0..self.candidates.len()).collect();
        order.sort_by(|&a, &b| self.probabilities[b][1].total_cmp(&self.probabilities[a][1]));

        order
            .into_iter()
            .filter_map(|i| self.candidates[i].clone())
            .collect()
    }
}

/// Dictionary-backed spellchecker with a learned reranker.
///
/// A word the dictionary accepts is returned unchanged. Any other word gets
/// the dictionary's suggestions, ordered by the reranker.
#[derive(Debug)]
pub struct SpellChecker<D> {
    dictionary: D,
    classifier: GradientBoostedClassifier,
}

impl<D: CandidateSource> SpellChecker<D> {
    /// Create a spellchecker with an untrained default reranker.
    pub fn new(dictionary: D) -> Self {
        Self::with_classifier(dictionary, GradientBoostedClassifier::new())
    }

    /// Create a spellchecker with an untrained reranker using the given hyperparameters.
    pub fn with_config(dictionary: D, config: ClassifierConfig) -> Self {
        Self::with_classifier(dictionary, GradientBoostedClassifier::with_config(config))
    }

    /// Create a spellchecker around an existing (possibly trained) classifier.
    pub fn with_classifier(dictionary: D, classifier: GradientBoostedClassifier) -> Self {
        SpellChecker {
            dictionary,
            classifier,
        }
    }

    /// Create a spellchecker whose reranker is loaded from a saved model.
    pub fn with_model_file<P: AsRef<Path>>(dictionary: D, path: P) -> Result<Self> {
        let classifier = GradientBoostedClassifier::load(path.as_ref())?;
        Ok(Self::with_classifier(dictionary, classifier))
    }

    /// Correct a word: `[word]` if it is spelled correctly, otherwise the
    /// reranked suggestions.
    pub fn check(&self, word: &str) -> Result<Vec<String>> {
        if self.lookup(word) {
            Ok(vec![word.to_string()])
        } else {
            self.suggest_rank(word)
        }
    }

    /// Unranked candidates: `[word]` if it is spelled correctly, otherwise the
    /// dictionary's suggestions in dictionary order. Needs no trained model.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        if self.lookup(word) {
            vec![word.to_string()]
        } else {
            self.suggest(word)
        }
    }

    /// Check if a word is in the dictionary.
    pub fn lookup(&self, word: &str) -> bool {
        self.dictionary.lookup(word)
    }

    /// Dictionary suggestions for a word.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        self.dictionary.suggest(word)
    }

    /// Features between a misspelling and a candidate.
    pub fn features(erroneous: &str, candidate: &str) -> FeatureVector {
        extract_features(erroneous, candidate)
    }

    /// Train the reranker. Replaces any previous fit.
    pub fn fit(&mut self, training_set: &TrainingSet) -> Result<()> {
        self.classifier
            .fit(training_set.features(), training_set.labels())
    }

    /// Score every suggestion for `word`.
    ///
    /// Returns the placeholder [`CandidateScores::empty`] without consulting the
    /// reranker when there are no suggestions.
    pub fn predict_proba(&self, word: &str) -> Result<CandidateScores> {
        let suggestions = self.suggest(word);
        if suggestions.is_empty() {
            return Ok(CandidateScores::empty());
        }

        let features: Vec<FeatureVector> = suggestions
            .iter()
            .map(|candidate| Self::features(word, candidate))
            .collect();
        let probabilities = self.classifier.predict_proba(&features)?;

        Ok(CandidateScores {
            probabilities,
            candidates: suggestions.into_iter().map(Some).collect(),
        })
    }

    /// The most probable suggestion, if any.
    pub fn suggest_best(&self, word: &str) -> Result<Option<String>> {
        Ok(self.predict_proba(word)?.ranked().into_iter().next())
    }

    /// All suggestions in descending order of probability.
    pub fn suggest_rank(&self, word: &str) -> Result<Vec<String>> {
        Ok(self.predict_proba(word)?.ranked())
    }

    /// Whether the reranker has been trained.
    pub fn is_trained(&self) -> bool {
        self.classifier.is_trained()
    }

    /// The reranker.
    pub fn classifier(&self) -> &GradientBoostedClassifier {
        &self.classifier
    }

    /// The candidate source.
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Save the trained reranker.
    pub fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.classifier.save(path.as_ref())
    }
}
