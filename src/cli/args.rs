//! Command line argument parsing for the spellrank CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::EvaluationConfig;
use crate::spelling::training::SkipPolicy;

/// spellrank - dictionary spelling correction with a learned reranker
#[derive(Parser, Debug, Clone)]
#[command(name = "spellrank")]
#[command(about = "Spelling correction with Hunspell candidates and a gradient-boosted reranker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellRankArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellRankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the reranker and report precision@k on a test set
    Evaluate(EvaluateArgs),

    /// Train the reranker and save it to a model file
    Train(TrainArgs),

    /// Rank corrections for words with a saved model
    Correct(CorrectArgs),
}

/// Where to find the Hunspell dictionary.
#[derive(Args, Debug, Clone)]
pub struct DictionaryArgs {
    /// Directory holding <LOCALE>.aff and <LOCALE>.dic
    #[arg(long, value_name = "DIR", env = "SPELLRANK_DICT_DIR")]
    pub dict_dir: Option<PathBuf>,

    /// Hunspell locale
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}

/// Options shared by every command that trains the reranker.
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// JSON configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Training pairs (misspelling<TAB>correction)
    #[arg(long, value_name = "TRAIN_FILE")]
    pub train: Option<PathBuf>,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Number of training pairs sampled without replacement
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Seed of the sampling RNG
    #[arg(long)]
    pub seed: Option<u64>,

    /// Handling of training pairs without a wrong suggestion
    #[arg(long)]
    pub skip_policy: Option<SkipPolicy>,

    /// Boosting iterations
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Maximum tree depth
    #[arg(long)]
    pub depth: Option<usize>,
}

impl TrainingArgs {
    /// Resolve the configuration file (or defaults) with flag overrides applied.
    pub fn to_config(&self) -> Result<EvaluationConfig> {
        let mut config = match &self.config {
            Some(path) => EvaluationConfig::load(path)?,
            None => EvaluationConfig::default(),
        };

        if let Some(train) = &self.train {
            config.train_path = train.clone();
        }
        if let Some(dir) = &self.dictionary.dict_dir {
            config.dictionary_dir = dir.clone();
        }
        if let Some(locale) = &self.dictionary.locale {
            config.locale = locale.clone();
        }
        if let Some(sample_size) = self.sample_size {
            config.sample_size = sample_size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(policy) = self.skip_policy {
            config.skip_policy = policy;
        }
        if let Some(iterations) = self.iterations {
            config.classifier.iterations = iterations;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.classifier.learning_rate = learning_rate;
        }
        if let Some(depth) = self.depth {
            config.classifier.depth = depth;
        }

        Ok(config)
    }
}

/// Arguments for a full evaluation run
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Test pairs (misspelling<TAB>correction)
    #[arg(long, value_name = "TEST_FILE")]
    pub test: Option<PathBuf>,

    /// Frequency dictionary (word,count) to load and report
    #[arg(long, value_name = "FREQ_FILE")]
    pub frequency_dict: Option<PathBuf>,

    /// Precision cutoffs (repeatable)
    #[arg(short, long = "k", value_name = "K")]
    pub ks: Vec<usize>,

    /// Save the trained model here
    #[arg(long, value_name = "MODEL_FILE")]
    pub save_model: Option<PathBuf>,
}

impl EvaluateArgs {
    pub fn to_config(&self) -> Result<EvaluationConfig> {
        let mut config = self.training.to_config()?;
        if let Some(test) = &self.test {
            config.test_path = test.clone();
        }
        if let Some(path) = &self.frequency_dict {
            config.frequency_dict = Some(path.clone());
        }
        if !self.ks.is_empty() {
            config.ks = self.ks.clone();
        }
        Ok(config)
    }
}

/// Arguments for training a model
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Model output path (JSON)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,
}

/// Arguments for correcting words
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Trained model (JSON)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Maximum number of suggestions shown per word
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Words to correct
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = SpellRankArgs::parse_from(["spellrank", "correct", "-m", "m.json", "teh"]);
        assert_eq!(args.verbosity(), 1);

        let args = SpellRankArgs::parse_from(["spellrank", "-vvv", "correct", "-m", "m.json", "teh"]);
        assert_eq!(args.verbosity(), 3);

        let args =
            SpellRankArgs::parse_from(["spellrank", "-q", "-vv", "correct", "-m", "m.json", "teh"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_evaluate_overrides() {
        let args = SpellRankArgs::parse_from([
            "spellrank",
            "evaluate",
            "--train",
            "data/train.tsv",
            "--test",
            "data/test.txt",
            "--locale",
            "en_GB",
            "--seed",
            "9",
            "--depth",
            "3",
            "--skip-policy",
            "keep-positive",
            "-k",
            "1",
            "-k",
            "5",
        ]);

        let Command::Evaluate(evaluate) = args.command else {
            panic!("Expected evaluate command");
        };
        let config = evaluate.to_config().unwrap();
        assert_eq!(config.train_path, PathBuf::from("data/train.tsv"));
        assert_eq!(config.test_path, PathBuf::from("data/test.txt"));
        assert_eq!(config.locale, "en_GB");
        assert_eq!(config.seed, 9);
        assert_eq!(config.classifier.depth, 3);
        assert_eq!(config.classifier.iterations, 20);
        assert_eq!(config.skip_policy, SkipPolicy::KeepPositive);
        assert_eq!(config.ks, vec![1, 5]);
    }

    #[test]
    fn test_evaluate_defaults() {
        let args = SpellRankArgs::parse_from(["spellrank", "evaluate"]);
        let Command::Evaluate(evaluate) = args.command else {
            panic!("Expected evaluate command");
        };
        assert_eq!(evaluate.to_config().unwrap().ks, vec![1, 10]);
    }

    #[test]
    fn test_correct_requires_words() {
        assert!(SpellRankArgs::try_parse_from(["spellrank", "correct", "-m", "m.json"]).is_err());
    }
}
