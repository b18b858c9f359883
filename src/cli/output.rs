//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellRankArgs};
use crate::error::Result;
use crate::evaluation::EvaluationReport;
use crate::spelling::training::TrainingSetReport;

/// Result structure for model training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub training_set: TrainingSetReport,
    pub trees: usize,
    pub final_training_loss: f64,
    pub training_time_ms: u64,
}

/// Ranked corrections for one word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordCorrection {
    pub word: String,
    pub correct: bool,
    pub suggestions: Vec<String>,
}

/// Result structure for the correct command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResults {
    pub corrections: Vec<WordCorrection>,
}

/// Results that know how to print themselves for a human reader.
pub trait HumanOutput {
    fn print_human(&self, args: &SpellRankArgs);
}

impl HumanOutput for EvaluationReport {
    fn print_human(&self, args: &SpellRankArgs) {
        for p in &self.precision {
            println!("Precision@{} = {}", p.k, p.precision);
        }

        if args.verbosity() > 1 {
            println!();
            println!("Training pairs: {}", self.training_set.pairs_seen);
            println!("  used: {}", self.training_set.pairs_used);
            println!(
                "  without negative: {}",
                self.training_set.pairs_without_negative
            );
            println!("Trees: {}", self.training_stats.iterations);
            println!(
                "Final training loss: {:.6}",
                self.training_stats.final_training_loss
            );
            println!("Test pairs: {}", self.test_pairs);
            println!("Duration: {}", format_duration(self.duration_ms));
        }
    }
}

impl HumanOutput for TrainingResult {
    fn print_human(&self, args: &SpellRankArgs) {
        println!("Model: {}", self.model_path);
        println!(
            "Rows: {} pairs used, {} without negative",
            self.training_set.pairs_used, self.training_set.pairs_without_negative
        );
        if args.verbosity() > 1 {
            println!("Trees: {}", self.trees);
            println!("Final training loss: {:.6}", self.final_training_loss);
            println!("Training time: {}", format_duration(self.training_time_ms));
        }
    }
}

impl HumanOutput for CorrectionResults {
    fn print_human(&self, _args: &SpellRankArgs) {
        for correction in &self.corrections {
            if correction.correct {
                println!("{}: ok", correction.word);
            } else if correction.suggestions.is_empty() {
                println!("{}: (no suggestions)", correction.word);
            } else {
                println!("{}: {}", correction.word, correction.suggestions.join(", "));
            }
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &SpellRankArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpellRankArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format milliseconds as a short human-readable duration.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms} ms")
    } else if ms < 60_000 {
        format!("{:.1} s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 ms");
        assert_eq!(format_duration(999), "999 ms");
        assert_eq!(format_duration(1500), "1.5 s");
        assert_eq!(format_duration(125_000), "2m 5s");
    }

    #[test]
    fn test_correction_results_json() {
        let results = CorrectionResults {
            corrections: vec![WordCorrection {
                word: "teh".to_string(),
                correct: false,
                suggestions: vec!["the".to_string(), "tea".to_string()],
            }],
        };

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value["corrections"][0]["word"], "teh");
        assert_eq!(value["corrections"][0]["suggestions"][1], "tea");
    }
}
