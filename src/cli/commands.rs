//! Command implementations for the spellrank CLI.

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::evaluation::{self, EvaluationConfig, load_dictionary};
use crate::ml::BinaryClassifier;
use crate::spelling::checker::SpellChecker;

/// Execute a CLI command.
pub fn execute_command(args: SpellRankArgs) -> Result<()> {
    match &args.command {
        Command::Evaluate(evaluate_args) => run_evaluation(evaluate_args.clone(), &args),
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Correct(correct_args) => correct_words(correct_args.clone(), &args),
    }
}

/// Train on sampled pairs and report precision@k on the test set.
fn run_evaluation(args: EvaluateArgs, cli_args: &SpellRankArgs) -> Result<()> {
    let config = args.to_config()?;
    info!(
        "evaluating with train={} test={} locale={}",
        config.train_path.display(),
        config.test_path.display(),
        config.locale
    );

    let (checker, report) = evaluation::run(&config)?;

    if let Some(path) = &args.save_model {
        checker.save_model(path)?;
        info!("saved model to {}", path.display());
    }

    output_result("Evaluation finished", &report, cli_args)
}

/// Train the reranker and save it.
fn train_model(args: TrainArgs, cli_args: &SpellRankArgs) -> Result<()> {
    let config = args.training.to_config()?;
    let (checker, training_set) = evaluation::train_checker(&config)?;
    checker.save_model(&args.output)?;

    let stats = checker.classifier().training_stats();
    output_result(
        "Model trained successfully",
        &TrainingResult {
            model_path: args.output.to_string_lossy().to_string(),
            training_set,
            trees: stats.iterations,
            final_training_loss: stats.final_training_loss,
            training_time_ms: stats.training_time_ms,
        },
        cli_args,
    )
}

/// Rank corrections for each word with a saved model.
fn correct_words(args: CorrectArgs, cli_args: &SpellRankArgs) -> Result<()> {
    let mut config = EvaluationConfig::default();
    if let Some(dir) = &args.dictionary.dict_dir {
        config.dictionary_dir = dir.clone();
    }
    if let Some(locale) = &args.dictionary.locale {
        config.locale = locale.clone();
    }

    let dictionary = load_dictionary(&config)?;
    let checker = SpellChecker::with_model_file(dictionary, &args.model)?;

    let corrections = args
        .words
        .iter()
        .map(|word| -> Result<WordCorrection> {
            let correct = checker.lookup(word);
            let mut suggestions = checker.check(word)?;
            suggestions.truncate(args.limit);
            Ok(WordCorrection {
                word: word.clone(),
                correct,
                suggestions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output_result(
        "Corrections",
        &CorrectionResults { corrections },
        cli_args,
    )
}
