//! Readers and writers for the evaluation data files.
//!
//! - error/correction pairs: two tab-separated columns, no header
//! - frequency dictionaries: `word,count` rows, no header
//! - plain lists: one entry per line

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellRankError};
use crate::spelling::dictionary::FrequencyDictionary;

/// A misspelling and its correction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub erroneous: String,
    pub correct: String,
}

impl WordPair {
    pub fn new<E: Into<String>, C: Into<String>>(erroneous: E, correct: C) -> Self {
        WordPair {
            erroneous: erroneous.into(),
            correct: correct.into(),
        }
    }
}

/// Read a `word,count` frequency file.
///
/// Rows with a missing or non-integer count are skipped and counted in
/// [`FrequencyDictionary::skipped_rows`]. A word seen twice keeps its last count.
pub fn read_dict<P: AsRef<Path>>(path: P) -> Result<FrequencyDictionary> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut dictionary = FrequencyDictionary::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let Some(word) = record.get(0) else {
            continue;
        };

        match record.get(1).map(|count| count.trim().parse::<u64>()) {
            Some(Ok(count)) => dictionary.insert(word.to_string(), count),
            _ => {
                debug!(
                    "skipping malformed row {} in {}: {:?}",
                    line + 1,
                    path.as_ref().display(),
                    record
                );
                dictionary.record_skipped_row();
            }
        }
    }

    Ok(dictionary)
}

/// Read tab-separated (misspelling, correction) pairs, in file order.
pub fn read_data<P: AsRef<Path>>(path: P) -> Result<Vec<WordPair>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != 2 {
            let line = record.position().map_or(0, |p| p.line());
            return Err(SpellRankError::dataset(format!(
                "{}:{line}: expected 2 tab-separated columns, found {}",
                path.as_ref().display(),
                record.len()
            )));
        }
        pairs.push(WordPair::new(&record[0], &record[1]));
    }

    debug!("read {} pairs from {}", pairs.len(), path.as_ref().display());
    Ok(pairs)
}

/// Write one entry per line.
pub fn write_list<P: AsRef<Path>, S: AsRef<str>>(path: P, items: &[S]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        writeln!(writer, "{}", item.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one entry per line, trimming surrounding whitespace.
pub fn read_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim().to_string())
                .map_err(SpellRankError::from)
        })
        .collect()
}
