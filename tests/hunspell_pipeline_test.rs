use std::fs;
use std::path::Path;

use tempfile::TempDir;

use spellrank::evaluation::{self, EvaluationConfig, train_checker};
use spellrank::prelude::*;

const AFF: &str = "SET UTF-8\nTRY esianrtolcdugmphbyfvkwz\n";
const DIC: &str = "13\nthe\ntea\nten\nthen\nhello\nhelp\nheld\nworld\nword\nwould\ncat\ncut\ncot\n";

fn write_fixture(dir: &Path) -> EvaluationConfig {
    fs::write(dir.join("en_TEST.aff"), AFF).unwrap();
    fs::write(dir.join("en_TEST.dic"), DIC).unwrap();
    fs::write(
        dir.join("train.tsv"),
        "teh\tthe\nhelo\thello\nwrod\tword\ncta\tcat\ntehn\tthen\n",
    )
    .unwrap();
    fs::write(dir.join("test.txt"), "hte\tthe\nhelo\thello\ncat\tcat\n").unwrap();
    fs::write(dir.join("freq.csv"), "the,100\nhello,20\nbroken\n").unwrap();

    EvaluationConfig {
        train_path: dir.join("train.tsv"),
        test_path: dir.join("test.txt"),
        dictionary_dir: dir.to_path_buf(),
        locale: "en_TEST".to_string(),
        frequency_dict: Some(dir.join("freq.csv")),
        sample_size: 5,
        seed: 7,
        ks: vec![1, 10],
        progress_interval: 2,
        ..Default::default()
    }
}

#[test]
fn test_full_run_reports_precision() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_fixture(dir.path());

    let (checker, report) = evaluation::run(&config)?;

    assert!(checker.is_trained());
    assert_eq!(report.test_pairs, 3);
    assert_eq!(report.training_set.pairs_seen, 5);
    assert_eq!(report.precision.len(), 2);

    let p1 = report.precision_at(1).unwrap();
    let p10 = report.precision_at(10).unwrap();
    assert!((0.0..=1.0).contains(&p1));
    assert!(p10 >= p1);
    // "cat" is spelled correctly and always counts as a hit.
    assert!(p10 >= 1.0 / 3.0);

    assert_eq!(checker.check("cat")?, vec!["cat"]);
    Ok(())
}

#[test]
fn test_saved_model_ranks_identically() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_fixture(dir.path());

    let (checker, training_set) = train_checker(&config)?;
    assert!(training_set.pairs_used > 0);

    let model_path = dir.path().join("model.json");
    checker.save_model(&model_path)?;

    let dictionary = HunspellDictionary::from_locale(dir.path(), "en_TEST")?;
    let reloaded = SpellChecker::with_model_file(dictionary, &model_path)?;

    for word in ["teh", "helo", "wrod", "hello", "qqqqqq"] {
        assert_eq!(checker.check(word)?, reloaded.check(word)?);
    }
    Ok(())
}

#[test]
fn test_config_file_and_missing_inputs() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_fixture(dir.path());

    let config_path = dir.path().join("config.json");
    fs::write(&config_path, serde_json::to_string(&config)?)?;
    assert_eq!(EvaluationConfig::load(&config_path)?, config);

    let missing = EvaluationConfig {
        test_path: dir.path().join("absent.txt"),
        ..config.clone()
    };
    assert!(evaluation::run(&missing).is_err());

    let wrong_locale = EvaluationConfig {
        locale: "xx_XX".to_string(),
        ..config
    };
    assert!(matches!(
        evaluation::run(&wrong_locale),
        Err(SpellRankError::Dictionary(_)) | Err(SpellRankError::Io(_))
    ));
    Ok(())
}
