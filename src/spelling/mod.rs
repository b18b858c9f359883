//! Spelling correction: candidate generation, features and reranking.
//!
//! Candidates come from a Hunspell dictionary; a gradient-boosted classifier
//! trained on string-distance features orders them.

pub mod checker;
pub mod dictionary;
pub mod features;
pub mod training;

// Re-export commonly used types
pub use checker::*;
pub use dictionary::*;
pub use features::*;
pub use training::*;
