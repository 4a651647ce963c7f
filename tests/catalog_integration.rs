//! Catalog loading integration tests

use book_or::assets::{image_path, manifest, BLANK_IMAGE};
use book_or::catalog::{load_catalog, Catalog};
use book_or::core::config::ExperimentConfig;
use book_or::core::error::BookError;
use book_or::core::types::Condition;
use book_or::experiment::plan_session;
use std::path::Path;

fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("book_or_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

/// A catalog file and a config pointing at it drive a short session plan
#[test]
fn test_custom_catalog_plan() {
    let catalog_path = temp_file(
        "catalog.toml",
        r#"
[[items]]
nouns = [["cup", "cups"], ["spoon", "spoons"]]

[[items]]
nouns = [["goose", "geese"], ["mouse", "mice"]]

[[trial_types]]
connective = "noun"
display = "or/noun"

[[trial_types]]
connective = "or"
display = "and/or"
"#,
    );
    let config_path = temp_file(
        "config.toml",
        &format!(
            "trial_count = 2\nseed = 8\ncatalog = {:?}\n",
            catalog_path.to_string_lossy()
        ),
    );

    let config = ExperimentConfig::load(&config_path).unwrap();
    let catalog = load_catalog(config.catalog.as_deref().unwrap()).unwrap();
    let plan = plan_session(&config, catalog).unwrap();

    assert_eq!(plan.trials.len(), 2);
    for trial in &plan.trials {
        match trial.trial_type.connective {
            Condition::Noun => assert_eq!(
                trial.sentence,
                format!("I have books about {}.", trial.item1.plural)
            ),
            Condition::Or => assert_eq!(
                trial.sentence,
                format!("I have books about {} and {}.", trial.item1.plural, trial.item2.plural)
            ),
            Condition::And => panic!("no and trials in this catalog"),
        }
    }
    let plurals: Vec<&str> = plan.trials.iter().map(|t| t.item1.plural.as_str()).collect();
    assert!(plurals.iter().all(|p| ["cups", "spoons", "geese", "mice"].contains(p)));

    std::fs::remove_file(catalog_path).ok();
    std::fs::remove_file(config_path).ok();
}

/// A catalog shorter than the trial count is rejected before the session starts
#[test]
fn test_short_catalog_rejected() {
    let config = ExperimentConfig {
        trial_count: 40,
        ..ExperimentConfig::default()
    };
    let err = plan_session(&config, Catalog::builtin()).unwrap_err();
    assert!(matches!(err, BookError::CatalogTooShort { required: 40, .. }));
}

/// The preload manifest lists every noun image once plus the shared images
#[test]
fn test_builtin_manifest() {
    let dir = Path::new("images");
    let files = manifest(dir, &Catalog::builtin());
    assert_eq!(files.len(), 75);
    assert!(files.contains(&dir.join(BLANK_IMAGE)));
    assert!(files.contains(&image_path(dir, "apple")));
}
