//! Item and trial-type catalogs
//!
//! Both lists are shuffled once per session and then consumed in lockstep by
//! the trial counter, so their shuffles are independent but both must cover
//! the full trial count.

pub mod items;
pub mod loader;
pub mod trial_types;

pub use items::{builtin_items, Item, Noun};
pub use loader::{load_catalog, parse_catalog};
pub use trial_types::{builtin_trial_types, DisplayPair, TrialType};

use rand::Rng;

use crate::core::error::{BookError, Result};
use crate::core::random::shuffle;

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    trial_types: Vec<TrialType>,
}

impl Catalog {
    pub fn new(items: Vec<Item>, trial_types: Vec<TrialType>) -> Self {
        Self { items, trial_types }
    }

    /// The lab's standard 36 × 36 catalog
    pub fn builtin() -> Self {
        Self::new(builtin_items(), builtin_trial_types())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn trial_types(&self) -> &[TrialType] {
        &self.trial_types
    }

    /// Shuffle both lists independently
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(rng, &mut self.items);
        shuffle(rng, &mut self.trial_types);
    }

    /// Both lists must have an entry for every trial
    pub fn ensure_covers(&self, trial_count: usize) -> Result<()> {
        if self.items.len() < trial_count {
            return Err(BookError::CatalogTooShort {
                kind: "items",
                available: self.items.len(),
                required: trial_count,
            });
        }
        if self.trial_types.len() < trial_count {
            return Err(BookError::CatalogTooShort {
                kind: "trial_types",
                available: self.trial_types.len(),
                required: trial_count,
            });
        }
        Ok(())
    }

    /// Image stems of every noun, in catalog order
    pub fn image_stems(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .flat_map(|item| item.nouns.iter().map(|n| n.singular.as_str()))
    }
}
