//! # spellrank
//!
//! Spelling correction that ranks Hunspell suggestions with a learned model.
//!
//! ## Features
//!
//! - Hunspell dictionaries (affix rules included) as the candidate generator
//! - String-distance features between a misspelling and each candidate
//! - Gradient-boosted tree reranker
//! - Offline evaluation with precision@k
//!
//! ```no_run
//! use spellrank::prelude::*;
//!
//! # fn main() -> spellrank::error::Result<()> {
//! let dictionary = HunspellDictionary::from_locale("dicts", "en_US")?;
//! let checker = SpellChecker::with_model_file(dictionary, "model.json")?;
//! println!("{:?}", checker.check("recieve")?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod ml;
pub mod spelling;

pub mod prelude {
    pub use crate::dataset::{WordPair, read_data, read_dict};
    pub use crate::error::{Result, SpellRankError};
    pub use crate::evaluation::{EvaluationConfig, EvaluationReport, Evaluator, precision_at_k};
    pub use crate::ml::{BinaryClassifier, ClassifierConfig, GradientBoostedClassifier};
    pub use crate::spelling::{
        CandidateScores, CandidateSource, FeatureVector, HunspellDictionary, SkipPolicy,
        SpellChecker, TrainingSet, TrainingSetBuilder, extract_features,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
