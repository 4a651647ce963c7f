//! Trial engine: builds each trial from the catalogs, renders it, and
//! accepts exactly one response per trial.

use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;

use super::flipbook::{FlipBook, TrialPictures};
use super::record::TrialRecord;
use super::sentence::cue_sentence;
use super::session::Session;
use crate::catalog::{Catalog, Noun, TrialType};
use crate::core::error::{BookError, Result};
use crate::core::random::coin_flip;
use crate::core::types::{Condition, Side, TrialIndex};
use crate::surface::RenderSurface;

/// Everything shown during one trial
#[derive(Debug, Clone, Serialize)]
pub struct PreparedTrial {
    pub index: TrialIndex,
    pub item1: Noun,
    pub item2: Noun,
    pub trial_type: TrialType,
    pub left: FlipBook,
    pub right: FlipBook,
    pub sentence: String,
}

impl PreparedTrial {
    pub fn book(&self, side: Side) -> &FlipBook {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn condition(&self, side: Side) -> Condition {
        self.trial_type.display.side(side)
    }
}

#[derive(Debug)]
struct ActiveTrial {
    trial: PreparedTrial,
    /// Set by the first accepted response; every later one is ignored
    locked: bool,
}

pub struct TrialEngine {
    catalog: Catalog,
    session: Session,
    image_dir: PathBuf,
    active: Option<ActiveTrial>,
}

impl TrialEngine {
    /// The catalog must already be shuffled; it is checked to cover the
    /// session's trial count.
    pub fn new(catalog: Catalog, session: Session, image_dir: PathBuf) -> Result<Self> {
        catalog.ensure_covers(session.trial_count())?;
        Ok(Self {
            catalog,
            session,
            image_dir,
            active: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Trial currently on screen, if any
    pub fn current(&self) -> Option<&PreparedTrial> {
        self.active.as_ref().map(|a| &a.trial)
    }

    pub fn awaiting_response(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.locked)
    }

    /// Build trial `index` without touching the display.
    ///
    /// Reads the catalogs only; randomness comes from `rng`.
    pub fn prepare_trial<R: Rng + ?Sized>(&self, index: TrialIndex, rng: &mut R) -> Result<PreparedTrial> {
        let item = self.catalog.items().get(index).ok_or(BookError::CatalogTooShort {
            kind: "items",
            available: self.catalog.items().len(),
            required: index + 1,
        })?;
        let trial_type = *self.catalog.trial_types().get(index).ok_or(BookError::CatalogTooShort {
            kind: "trial_types",
            available: self.catalog.trial_types().len(),
            required: index + 1,
        })?;

        let [first, second] = &item.nouns;
        let (item1, item2) = if coin_flip(rng) == 0 {
            (first.clone(), second.clone())
        } else {
            (second.clone(), first.clone())
        };
        let pics = TrialPictures::resolve(&self.image_dir, &item1, &item2);
        let left = FlipBook::build(rng, trial_type.display.left, &pics);
        let right = FlipBook::build(rng, trial_type.display.right, &pics);
        let sentence = cue_sentence(trial_type.connective, &item1.plural, &item2.plural);

        Ok(PreparedTrial {
            index,
            item1,
            item2,
            trial_type,
            left,
            right,
            sentence,
        })
    }

    /// Build trial `index`, put it on the surface and open it for a response
    pub fn run_trial<R, S>(&mut self, index: TrialIndex, rng: &mut R, surface: &mut S) -> Result<&PreparedTrial>
    where
        R: Rng + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let trial = self.prepare_trial(index, rng)?;

        for side in Side::BOTH {
            surface.set_side_condition(side, trial.condition(side));
            surface.set_flip_book(side, trial.book(side));
        }
        surface.set_sentence(&trial.sentence);

        tracing::debug!(
            trial = index + 1,
            item1 = %trial.item1.singular,
            item2 = %trial.item2.singular,
            connective = %trial.trial_type.connective,
            display = %trial.trial_type.display,
            "Presenting trial"
        );

        let active = self.active.insert(ActiveTrial { trial, locked: false });
        Ok(&active.trial)
    }

    /// Run the trial the counter points at
    pub fn start_next_trial<R, S>(&mut self, rng: &mut R, surface: &mut S) -> Result<&PreparedTrial>
    where
        R: Rng + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let index = self.session.counter();
        self.run_trial(index, rng, surface)
    }

    /// Accept a click or touch on `side`.
    ///
    /// Only the first response of a trial is accepted: it marks the side,
    /// advances the counter and yields the record. Anything after that, or
    /// with no trial on screen, returns `None`.
    pub fn respond<S: RenderSurface + ?Sized>(&mut self, side: Side, surface: &mut S) -> Option<TrialRecord> {
        let active = self.active.as_mut()?;
        if active.locked {
            return None;
        }
        active.locked = true;

        surface.mark_selected(side);

        let trial = &active.trial;
        let record = TrialRecord {
            subject_id: self.session.subject().to_string(),
            trial_number: self.session.counter() + 1,
            item1: trial.item1.singular.clone(),
            item2: trial.item2.singular.clone(),
            word_type: trial.trial_type.connective,
            display_type: trial.trial_type.display,
            side,
            response: trial.condition(side),
        };
        self.session.advance();
        Some(record)
    }

    /// Remove the finished trial from the surface
    pub fn clear<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_stage();
        self.active = None;
    }

    /// Start the session over with a freshly shuffled catalog
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.catalog.shuffle(rng);
        self.session.reset();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DisplayPair, Item};
    use crate::core::random::session_rng;
    use crate::surface::HeadlessSurface;
    use crate::trial::session::SubjectId;

    fn apple_pear_engine(connective: Condition, display: &str) -> TrialEngine {
        let catalog = Catalog::new(
            vec![Item::new(Noun::new("apple", "apples"), Noun::new("pear", "pears"))],
            vec![TrialType::new(connective, display.parse().unwrap())],
        );
        let session = Session::new(SubjectId::parse("debug").unwrap(), 1, 42);
        TrialEngine::new(catalog, session, PathBuf::from("images")).unwrap()
    }

    #[test]
    fn test_catalog_must_cover_session() {
        let session = Session::new(SubjectId::parse("s").unwrap(), 37, 0);
        let result = TrialEngine::new(Catalog::builtin(), session, PathBuf::from("images"));
        assert!(matches!(result, Err(BookError::CatalogTooShort { kind: "items", .. })));
    }

    #[test]
    fn test_and_trial_sentence_uses_or() {
        let engine = apple_pear_engine(Condition::And, "and/or");
        let (mut rng, _) = session_rng(Some(42));
        let trial = engine.prepare_trial(0, &mut rng).unwrap();
        let expected = format!(
            "I have books about {} or {}.",
            trial.item1.plural, trial.item2.plural
        );
        assert_eq!(trial.sentence, expected);
        assert!(
            trial.sentence == "I have books about apples or pears."
                || trial.sentence == "I have books about pears or apples."
        );
    }

    #[test]
    fn test_books_follow_display_pair() {
        let engine = apple_pear_engine(Condition::Noun, "or/noun");
        let (mut rng, _) = session_rng(Some(3));
        let trial = engine.prepare_trial(0, &mut rng).unwrap();
        let pics = TrialPictures::resolve(&PathBuf::from("images"), &trial.item1, &trial.item2);

        assert_eq!(trial.left.pages_showing(&pics.pic1), 2);
        assert_eq!(trial.left.pages_showing(&pics.pic2), 2);
        assert_eq!(trial.right.pages_showing(&pics.pic1), 4);
        assert_eq!(trial.right.pages_showing(&pics.pic2), 0);
        assert_eq!(trial.sentence, format!("I have books about {}.", trial.item1.plural));
    }

    #[test]
    fn test_pair_order_is_shuffled() {
        let engine = apple_pear_engine(Condition::Or, "and/or");
        let mut apple_first = 0;
        for seed in 0..200 {
            let (mut rng, _) = session_rng(Some(seed));
            if engine.prepare_trial(0, &mut rng).unwrap().item1.singular == "apple" {
                apple_first += 1;
            }
        }
        assert!(apple_first > 60 && apple_first < 140, "apple first {} / 200", apple_first);
    }

    #[test]
    fn test_response_lock() {
        let mut engine = apple_pear_engine(Condition::And, "and/noun");
        let mut surface = HeadlessSurface::new();
        let (mut rng, _) = session_rng(Some(42));

        engine.run_trial(0, &mut rng, &mut surface).unwrap();
        assert!(engine.awaiting_response());
        assert_eq!(surface.side_condition(Side::Left), Some(Condition::And));
        assert_eq!(surface.side_condition(Side::Right), Some(Condition::Noun));

        let record = engine.respond(Side::Right, &mut surface).unwrap();
        assert_eq!(record.trial_number, 1);
        assert_eq!(record.side, Side::Right);
        assert_eq!(record.response, Condition::Noun);
        assert_eq!(record.display_type, DisplayPair::new(Condition::And, Condition::Noun));

        // Same-tick repeats on either side are all dropped
        assert!(engine.respond(Side::Right, &mut surface).is_none());
        assert!(engine.respond(Side::Left, &mut surface).is_none());
        assert_eq!(engine.session().counter(), 1);
        assert_eq!(surface.selected(), Some(Side::Right));
    }

    #[test]
    fn test_respond_without_trial_ignored() {
        let mut engine = apple_pear_engine(Condition::And, "and/or");
        let mut surface = HeadlessSurface::new();
        assert!(engine.respond(Side::Left, &mut surface).is_none());
        assert_eq!(engine.session().counter(), 0);
    }

    #[test]
    fn test_reset_restarts_counter() {
        let mut engine = apple_pear_engine(Condition::Noun, "and/or");
        let mut surface = HeadlessSurface::new();
        let (mut rng, _) = session_rng(Some(1));
        engine.start_next_trial(&mut rng, &mut surface).unwrap();
        engine.respond(Side::Left, &mut surface);
        assert!(engine.session().is_complete());
        engine.reset(&mut rng);
        assert_eq!(engine.session().counter(), 0);
        assert!(engine.current().is_none());
    }
}
