//! Load a replacement catalog from TOML
//!
//! ```toml
//! [[items]]
//! nouns = [["apple", "apples"], ["pear", "pears"]]
//!
//! [[trial_types]]
//! connective = "and"
//! display = "and/or"
//! ```
//!
//! Condition strings are checked here, so a typo fails at load time instead
//! of leaving a book empty mid-session.

use serde::Deserialize;
use std::path::Path;

use super::items::{Item, Noun};
use super::trial_types::TrialType;
use super::Catalog;
use crate::core::error::{BookError, Result};

#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<ItemRow>,
    trial_types: Vec<TrialTypeRow>,
}

#[derive(Deserialize)]
struct ItemRow {
    nouns: [[String; 2]; 2],
}

#[derive(Deserialize)]
struct TrialTypeRow {
    connective: String,
    display: String,
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let file: CatalogFile = toml::from_str(content)?;

    let items = file
        .items
        .into_iter()
        .map(|row| {
            let [[s1, p1], [s2, p2]] = row.nouns;
            Item::new(
                Noun { singular: s1, plural: p1 },
                Noun { singular: s2, plural: p2 },
            )
        })
        .collect::<Vec<_>>();

    let trial_types = file
        .trial_types
        .iter()
        .enumerate()
        .map(|(i, row)| {
            TrialType::parse(&row.connective, &row.display).map_err(|e| match e {
                BookError::UnknownCondition(s) => {
                    BookError::UnknownCondition(format!("trial_types[{}]: {}", i, s))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for item in &items {
        if item.nouns.iter().any(|n| n.singular.trim().is_empty()) {
            return Err(BookError::InvalidConfig("catalog item with an empty noun".into()));
        }
    }

    Ok(Catalog::new(items, trial_types))
}
