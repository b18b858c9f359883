//! Error types for the spellrank library.
//!
//! All fallible operations return [`SpellRankError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use spellrank::error::{Result, SpellRankError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellRankError::invalid_argument("k must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::MLError;

/// The main error type for spellrank operations.
#[derive(Error, Debug)]
pub enum SpellRankError {
    /// I/O errors (missing files, unreadable directories, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Delimited file parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hunspell dictionary could not be loaded
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Malformed training or test data
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Reranker errors
    #[error(transparent)]
    Model(#[from] MLError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Metric requested over zero examples
    #[error("Evaluation set is empty")]
    EmptyEvaluationSet,

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpellRankError.
pub type Result<T> = std::result::Result<T, SpellRankError>;

impl SpellRankError {
    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        SpellRankError::Dictionary(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        SpellRankError::Dataset(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellRankError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellRankError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpellRankError::Other(msg.into())
    }
}
