//! Offline evaluation of the spellchecker: train the reranker on sampled
//! pairs, rank a held-out set and report precision@k.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dataset::{WordPair, read_data, read_dict};
use crate::error::{Result, SpellRankError};
use crate::ml::{BinaryClassifier, ClassifierConfig, TrainingStats};
use crate::spelling::checker::SpellChecker;
use crate::spelling::dictionary::{CandidateSource, HunspellDictionary};
use crate::spelling::training::{SkipPolicy, TrainingSetBuilder, TrainingSetReport};

/// Configuration of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Training pairs (tab-separated).
    pub train_path: PathBuf,
    /// Test pairs (tab-separated).
    pub test_path: PathBuf,
    /// Directory holding `<locale>.aff` and `<locale>.dic`.
    pub dictionary_dir: PathBuf,
    /// Hunspell locale, e.g. `en_US`.
    pub locale: String,
    /// Optional `word,count` frequency file. Loaded and reported only.
    pub frequency_dict: Option<PathBuf>,
    /// Number of training pairs sampled without replacement.
    pub sample_size: usize,
    /// Seed of the sampling RNG.
    pub seed: u64,
    /// Cutoffs at which precision is reported.
    pub ks: Vec<usize>,
    /// Handling of pairs without a wrong suggestion.
    pub skip_policy: SkipPolicy,
    /// Log progress every this many pairs (0 disables).
    pub progress_interval: usize,
    /// Reranker hyperparameters.
    pub classifier: ClassifierConfig,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            train_path: PathBuf::from("train.tsv"),
            test_path: PathBuf::from("test.txt"),
            dictionary_dir: PathBuf::from("."),
            locale: "en_US".to_string(),
            frequency_dict: None,
            sample_size: 5000,
            seed: 42,
            ks: vec![1, 10],
            skip_policy: SkipPolicy::default(),
            progress_interval: 1000,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl EvaluationConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EvaluationConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(SpellRankError::invalid_config("sample_size must be at least 1"));
        }
        if self.ks.is_empty() {
            return Err(SpellRankError::invalid_config("ks must not be empty"));
        }
        if self.ks.contains(&0) {
            return Err(SpellRankError::invalid_config("ks must be positive"));
        }
        self.classifier
            .validate()
            .map_err(|e| SpellRankError::invalid_config(e.to_string()))
    }
}

/// Pick `amount` distinct indices from `0..len` with a seeded RNG.
pub fn sample_indices(len: usize, amount: usize, seed: u64) -> Result<Vec<usize>> {
    if amount > len {
        return Err(SpellRankError::invalid_argument(format!(
            "cannot sample {amount} items without replacement from {len}"
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(rand::seq::index::sample(&mut rng, len, amount).into_vec())
}

/// Sample `amount` distinct pairs with a seeded RNG.
pub fn sample_pairs(pairs: &[WordPair], amount: usize, seed: u64) -> Result<Vec<&WordPair>> {
    Ok(sample_indices(pairs.len(), amount, seed)?
        .into_iter()
        .map(|i| &pairs[i])
        .collect())
}

/// Fraction of cases whose true word is among the first `k` suggestions.
pub fn precision_at_k<S: AsRef<str>>(
    true_words: &[S],
    suggestions: &[Vec<String>],
    k: usize,
) -> Result<f64> {
    if k == 0 {
        return Err(SpellRankError::invalid_argument("k must be at least 1"));
    }
    if true_words.len() != suggestions.len() {
        return Err(SpellRankError::invalid_argument(format!(
            "{} true words but {} suggestion lists",
            true_words.len(),
            suggestions.len()
        )));
    }
    if true_words.is_empty() {
        return Err(SpellRankError::EmptyEvaluationSet);
    }

    let hits = true_words
        .iter()
        .zip(suggestions)
        .filter(|&(truth, suggested)| {
            let truth = truth.as_ref();
            suggested.iter().take(k).any(|candidate| candidate == truth)
        })
        .count();

    Ok(hits as f64 / true_words.len() as f64)
}

/// Precision at one cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionAtK {
    pub k: usize,
    pub precision: f64,
}

/// Outcome of an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Precision at each configured cutoff, in configuration order.
    pub precision: Vec<PrecisionAtK>,
    /// How the sampled training pairs were used.
    pub training_set: TrainingSetReport,
    /// Reranker training statistics.
    pub training_stats: TrainingStats,
    /// Number of pairs ranked.
    pub test_pairs: usize,
    /// Wall-clock time of the whole run.
    pub duration_ms: u64,
}

impl EvaluationReport {
    /// Precision at cutoff `k`, if it was computed.
    pub fn precision_at(&self, k: usize) -> Option<f64> {
        self.precision
            .iter()
            .find(|p| p.k == k)
            .map(|p| p.precision)
    }
}

/// Trains a spellchecker's reranker and measures it on held-out pairs.
pub struct Evaluator<D> {
    checker: SpellChecker<D>,
    config: EvaluationConfig,
}

impl<D: CandidateSource> Evaluator<D> {
    pub fn new(checker: SpellChecker<D>, config: EvaluationConfig) -> Self {
        Evaluator { checker, config }
    }

    pub fn checker(&self) -> &SpellChecker<D> {
        &self.checker
    }

    pub fn into_checker(self) -> SpellChecker<D> {
        self.checker
    }

    /// Sample training pairs, build the training set and fit the reranker.
    pub fn train(&mut self, train: &[WordPair]) -> Result<TrainingSetReport> {
        let sampled = sample_pairs(train, self.config.sample_size, self.config.seed)?;
        info!(
            "building training set from {} of {} pairs (seed {})",
            sampled.len(),
            train.len(),
            self.config.seed
        );

        let mut builder = TrainingSetBuilder::new(self.config.skip_policy);
        for (i, pair) in sampled.iter().enumerate() {
            let suggestions = self.checker.candidates(&pair.erroneous);
            builder.add_pair(&pair.erroneous, &pair.correct, &suggestions);
            self.log_progress("training pairs", i + 1, sampled.len());
        }

        let (training_set, report) = builder.finish();
        if report.pairs_without_negative > 0 {
            warn!(
                "{} of {} training pairs had no wrong suggestion ({:?})",
                report.pairs_without_negative, report.pairs_seen, self.config.skip_policy
            );
        }

        self.checker.fit(&training_set)?;
        Ok(report)
    }

    /// Rank suggestions for every test misspelling.
    pub fn rank_all(&self, test: &[WordPair]) -> Result<Vec<Vec<String>>> {
        test.iter()
            .enumerate()
            .map(|(i, pair)| {
                let ranked = self.checker.check(&pair.erroneous);
                self.log_progress("test pairs", i + 1, test.len());
                ranked
            })
            .collect()
    }

    /// Train on `train`, rank `test` and compute precision at every configured cutoff.
    pub fn evaluate(&mut self, train: &[WordPair], test: &[WordPair]) -> Result<EvaluationReport> {
        self.config.validate()?;
        let start = Instant::now();

        let training_set = self.train(train)?;
        let suggestions = self.rank_all(test)?;
        let true_words: Vec<&str> = test.iter().map(|p| p.correct.as_str()).collect();

        let precision = self
            .config
            .ks
            .iter()
            .map(|&k| -> Result<PrecisionAtK> {
                Ok(PrecisionAtK {
                    k,
                    precision: precision_at_k(&true_words, &suggestions, k)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EvaluationReport {
            precision,
            training_set,
            training_stats: self.checker.classifier().training_stats(),
            test_pairs: test.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn log_progress(&self, what: &str, done: usize, total: usize) {
        let interval = self.config.progress_interval;
        if interval > 0 && (done % interval == 0 || done == total) {
            info!("{what}: {done}/{total}");
        }
    }
}

/// Load the Hunspell dictionary named by the configuration.
pub fn load_dictionary(config: &EvaluationConfig) -> Result<HunspellDictionary> {
    let start = Instant::now();
    let dictionary = HunspellDictionary::from_locale(&config.dictionary_dir, &config.locale)?;
    info!(
        "loaded dictionary '{}' in {:?}",
        dictionary.name(),
        start.elapsed()
    );
    Ok(dictionary)
}

/// Build a spellchecker from the configuration and train its reranker.
pub fn train_checker(
    config: &EvaluationConfig,
) -> Result<(SpellChecker<HunspellDictionary>, TrainingSetReport)> {
    config.validate()?;
    let dictionary = load_dictionary(config)?;
    let train = read_data(&config.train_path)?;

    let checker = SpellChecker::with_config(dictionary, config.classifier.clone());
    let mut evaluator = Evaluator::new(checker, config.clone());
    let report = evaluator.train(&train)?;
    Ok((evaluator.into_checker(), report))
}

/// Run the full evaluation described by the configuration.
pub fn run(config: &EvaluationConfig) -> Result<(SpellChecker<HunspellDictionary>, EvaluationReport)> {
    config.validate()?;

    if let Some(path) = &config.frequency_dict {
        let frequencies = read_dict(path)?;
        info!(
            "frequency dictionary: {} words, {} rows skipped",
            frequencies.len(),
            frequencies.skipped_rows()
        );
    }

    let test = read_data(&config.test_path)?;
    let train = read_data(&config.train_path)?;
    let dictionary = load_dictionary(config)?;

    let checker = SpellChecker::with_config(dictionary, config.classifier.clone());
    let mut evaluator = Evaluator::new(checker, config.clone());
    let report = evaluator.evaluate(&train, &test)?;
    Ok((evaluator.into_checker(), report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestions(lists: &[&[&str]]) -> Vec<Vec<String>> {
        lists
            .iter()
            .map(|l| l.iter().map(|w| w.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_precision_at_k_examples() {
        let first = suggestions(&[&["cat", "cot"]]);
        let second = suggestions(&[&["cot", "cat"]]);

        assert_eq!(precision_at_k(&["cat"], &first, 1).unwrap(), 1.0);
        assert_eq!(precision_at_k(&["cat"], &second, 1).unwrap(), 0.0);
        assert_eq!(precision_at_k(&["cat"], &first, 10).unwrap(), 1.0);
        assert_eq!(precision_at_k(&["cat"], &second, 10).unwrap(), 1.0);
    }

    #[test]
    fn test_precision_at_k_beyond_list_length() {
        let lists = suggestions(&[&["a", "b", "c"], &["x"], &[], &["q", "r", "s"]]);
        let truths = ["c", "y", "z", "s"];

        let whole = precision_at_k(&truths, &lists, 3).unwrap();
        assert_eq!(whole, 0.5);
        for k in [4, 10, 100] {
            assert_eq!(precision_at_k(&truths, &lists, k).unwrap(), whole);
        }
        assert_eq!(precision_at_k(&truths, &lists, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_precision_at_k_empty() {
        let truths: [&str; 0] = [];
        assert!(matches!(
            precision_at_k(&truths, &[], 1),
            Err(SpellRankError::EmptyEvaluationSet)
        ));
    }

    #[test]
    fn test_precision_at_k_invalid_arguments() {
        let lists = suggestions(&[&["cat"]]);
        assert!(precision_at_k(&["cat"], &lists, 0).is_err());
        assert!(precision_at_k(&["cat", "dog"], &lists, 1).is_err());
    }

    #[test]
    fn test_sample_indices_is_reproducible() {
        let a = sample_indices(100, 10, 7).unwrap();
        let b = sample_indices(100, 10, 7).unwrap();
        assert_eq!(a, b);

        let mut unique = a.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert!(a.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_sample_indices_too_many() {
        assert!(sample_indices(3, 4, 0).is_err());
        assert_eq!(sample_indices(3, 3, 0).unwrap().len(), 3);
    }

    #[test]
    fn test_config_defaults() {
        let config = EvaluationConfig::default();
        assert_eq!(config.sample_size, 5000);
        assert_eq!(config.ks, vec![1, 10]);
        assert_eq!(config.locale, "en_US");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = EvaluationConfig {
            ks: vec![1, 0],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvaluationConfig {
            sample_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: EvaluationConfig = serde_json::from_str(
            r#"{"locale": "en_GB", "seed": 3, "classifier": {"depth": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.locale, "en_GB");
        assert_eq!(config.seed, 3);
        assert_eq!(config.classifier.depth, 3);
        assert_eq!(config.classifier.iterations, 20);
        assert_eq!(config.sample_size, 5000);
    }
}
