//! Dictionaries used for spelling correction.
//!
//! [`HunspellDictionary`] is the candidate generator: it answers whether a
//! word is spelled correctly (affix rules included) and proposes corrections
//! for words that are not. [`FrequencyDictionary`] holds `word -> count`
//! tables read from frequency files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, SpellRankError};

/// A source of correction candidates.
pub trait CandidateSource {
    /// Check if a word is in the dictionary.
    fn lookup(&self, word: &str) -> bool;

    /// Candidate corrections for a word, in the order the source ranks them.
    fn suggest(&self, word: &str) -> Vec<String>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for &T {
    fn lookup(&self, word: &str) -> bool {
        (**self).lookup(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        (**self).suggest(word)
    }
}

/// Hunspell dictionary (`.aff` + `.dic`) backed by `spellbook`.
pub struct HunspellDictionary {
    inner: spellbook::Dictionary,
    name: String,
}

impl std::fmt::Debug for HunspellDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HunspellDictionary")
            .field("name", &self.name)
            .finish()
    }
}

impl HunspellDictionary {
    /// Build a dictionary from the contents of an `.aff` and a `.dic` file.
    pub fn from_strings(name: &str, aff: &str, dic: &str) -> Result<Self> {
        let inner = spellbook::Dictionary::new(aff, dic).map_err(|e| {
            SpellRankError::dictionary(format!("failed to parse dictionary '{name}': {e}"))
        })?;

        Ok(HunspellDictionary {
            inner,
            name: name.to_string(),
        })
    }

    /// Load a dictionary from an explicit `.aff`/`.dic` file pair.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(aff_path: P, dic_path: Q) -> Result<Self> {
        let aff_path = aff_path.as_ref();
        let dic_path = dic_path.as_ref();

        let aff = read_dictionary_file(aff_path)?;
        let dic = read_dictionary_file(dic_path)?;

        let name = dic_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| dic_path.display().to_string());

        debug!(
            "loading dictionary '{name}' from {} and {}",
            aff_path.display(),
            dic_path.display()
        );
        Self::from_strings(&name, &aff, &dic)
    }

    /// Load the dictionary for a locale such as `en_US` from `<dir>/<locale>.aff`
    /// and `<dir>/<locale>.dic`.
    pub fn from_locale<P: AsRef<Path>>(dir: P, locale: &str) -> Result<Self> {
        let (aff_path, dic_path) = locale_paths(dir.as_ref(), locale);
        Self::from_files(aff_path, dic_path)
    }

    /// Name of the dictionary (the locale when loaded from files).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CandidateSource for HunspellDictionary {
    fn lookup(&self, word: &str) -> bool {
        self.inner.check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        self.inner.suggest(word, &mut suggestions);
        suggestions
    }
}

/// Paths of the `.aff` and `.dic` files for a locale inside a directory.
pub fn locale_paths(dir: &Path, locale: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{locale}.aff")),
        dir.join(format!("{locale}.dic")),
    )
}

fn read_dictionary_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SpellRankError::dictionary(format!("cannot read {}: {e}", path.display()))
    })
}

/// Words and their corpus frequencies.
#[derive(Debug, Clone, Default)]
pub struct FrequencyDictionary {
    /// Words and their frequencies
    words: HashMap<String, u64>,
    /// Rows rejected while loading (missing or non-integer count)
    skipped_rows: usize,
}

impl FrequencyDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frequency of a word, replacing any earlier count.
    pub fn insert(&mut self, word: String, frequency: u64) {
        self.words.insert(word, frequency);
    }

    /// Record a row that could not be parsed.
    pub fn record_skipped_row(&mut self) {
        self.skipped_rows += 1;
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.words.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of rows skipped while loading.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}
