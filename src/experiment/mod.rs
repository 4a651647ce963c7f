//! Experiment flow
//!
//! Instructions → subject check → start screen → training → trials →
//! finished. The state machine moves only on input (`check`,
//! `begin_training`, `clear_marker`, `respond`) and on `tick`, which fires
//! the pacing timers that are due. Nothing here blocks or sleeps.

pub mod plan;

pub use plan::{plan_session, SessionPlan};

use rand::SeedableRng;
use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::core::config::ExperimentConfig;
use crate::core::error::{BookError, Result};
use crate::core::random::{session_rng, SessionRng};
use crate::core::types::Side;
use crate::slides::{Panel, SlideController};
use crate::submit::{Delivery, Submitter};
use crate::surface::RenderSurface;
use crate::training::{ClearOutcome, MarkerId, TrainingGame};
use crate::trial::{Session, SubjectId, TrialEngine, TrialRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Instructions,
    StartGame,
    Training,
    Stage,
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Instructions => "instructions",
            Self::StartGame => "startGame",
            Self::Training => "training",
            Self::Stage => "stage",
            Self::Finished => "finished",
        }
    }
}

/// Timed follow-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    HideTraining,
    StartTrials,
    ClearStage,
    NextTrial,
}

pub struct Experiment<S: RenderSurface> {
    config: ExperimentConfig,
    surface: S,
    slides: SlideController,
    seed: u64,
    /// Drives catalog order, pair order and books
    trial_rng: SessionRng,
    /// Separate stream so training never shifts the trial sequence
    training_rng: SessionRng,
    catalog: Option<Catalog>,
    engine: Option<TrialEngine>,
    training: TrainingGame,
    submitter: Submitter,
    start_enabled: bool,
    phase: Phase,
    pending: Option<(Instant, Step)>,
}

impl<S: RenderSurface> Experiment<S> {
    /// Shuffle the catalog and show the instructions panel.
    ///
    /// Start stays disabled until `assets_ready` is called.
    pub fn new(config: ExperimentConfig, mut catalog: Catalog, mut surface: S, submitter: Submitter) -> Result<Self> {
        config.validate()?;
        catalog.ensure_covers(config.trial_count)?;

        let (mut trial_rng, seed) = session_rng(config.seed);
        let training_rng = SessionRng::seed_from_u64(seed.wrapping_add(1));
        catalog.shuffle(&mut trial_rng);
        tracing::info!(seed, trials = config.trial_count, "Session prepared");

        let mut slides = SlideController::new();
        slides.show_slide(Panel::Instructions, &mut surface);
        surface.set_start_enabled(false);

        Ok(Self {
            config,
            surface,
            slides,
            seed,
            trial_rng,
            training_rng,
            catalog: Some(catalog),
            engine: None,
            training: TrainingGame::new(),
            submitter,
            start_enabled: false,
            phase: Phase::Instructions,
            pending: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn slides(&self) -> &SlideController {
        &self.slides
    }

    pub fn training(&self) -> &TrainingGame {
        &self.training
    }

    pub fn engine(&self) -> Option<&TrialEngine> {
        self.engine.as_ref()
    }

    pub fn submitter_mut(&mut self) -> &mut Submitter {
        &mut self.submitter
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// When the next timer fires, if one is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|(due, _)| due)
    }

    /// Preloading finished; allow the session to start
    pub fn assets_ready(&mut self) {
        self.start_enabled = true;
        self.surface.set_start_enabled(true);
    }

    fn expect_phase(&self, phase: Phase) -> Result<()> {
        if self.phase != phase {
            return Err(BookError::WrongPhase(self.phase.name()));
        }
        Ok(())
    }

    /// Validate the subject ID and move to the start screen
    pub fn check(&mut self, subject_input: &str) -> Result<()> {
        self.expect_phase(Phase::Instructions)?;
        if !self.start_enabled {
            return Err(BookError::StartDisabled);
        }

        let subject = match SubjectId::parse(subject_input) {
            Ok(subject) => subject,
            Err(e) => {
                self.surface.notify(&e.to_string());
                return Err(e);
            }
        };

        let catalog = self.catalog.take().ok_or(BookError::WrongPhase(self.phase.name()))?;
        let session = Session::new(subject, self.config.trial_count, self.seed);
        let engine = TrialEngine::new(catalog, session, self.config.image_dir.clone())?;
        tracing::info!(subject = %engine.session().subject(), "Subject checked in");
        self.engine = Some(engine);

        self.slides.show_slide(Panel::StartGame, &mut self.surface);
        self.phase = Phase::StartGame;
        Ok(())
    }

    /// Place the training markers and show them
    pub fn begin_training(&mut self) -> Result<()> {
        self.expect_phase(Phase::StartGame)?;
        let markers = self.training.start(&mut self.training_rng, &self.config.training)?;
        self.surface.place_markers(markers);
        self.slides.show_slide(Panel::Training, &mut self.surface);
        self.phase = Phase::Training;
        Ok(())
    }

    /// Tap on a training marker
    pub fn clear_marker(&mut self, id: MarkerId, now: Instant) -> ClearOutcome {
        if self.phase != Phase::Training {
            return ClearOutcome::Ignored;
        }
        let outcome = self.training.clear(id);
        match outcome {
            ClearOutcome::Ignored => {}
            ClearOutcome::Cleared { .. } => self.surface.cross_out_marker(id),
            ClearOutcome::Completed => {
                self.surface.cross_out_marker(id);
                self.surface.remove_markers();
                tracing::info!("Training complete");
                self.schedule(now + self.config.timing.training_exit(), Step::HideTraining);
            }
        }
        outcome
    }

    /// Tap on one of the two books.
    ///
    /// Returns the record when this was the trial's accepted response.
    pub fn respond(&mut self, side: Side, now: Instant) -> Option<TrialRecord> {
        if self.phase != Phase::Stage {
            return None;
        }
        let engine = self.engine.as_mut()?;
        let record = engine.respond(side, &mut self.surface)?;
        let debug = engine.session().subject().is_debug();

        tracing::info!(
            trial = record.trial_number,
            side = %record.side,
            response = %record.response,
            "Response recorded"
        );
        if let Delivery::Surfaced(line) = self.submitter.submit(&record, debug) {
            self.surface.notify(line.trim_end());
        }

        self.schedule(now + self.config.timing.feedback(), Step::ClearStage);
        Some(record)
    }

    /// Fire every timer due at `now`, chaining follow-ups that are also due
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        while let Some((due, step)) = self.pending {
            if due > now {
                break;
            }
            self.pending = None;
            self.run_step(step, due)?;
        }
        Ok(())
    }

    fn schedule(&mut self, due: Instant, step: Step) {
        self.pending = Some((due, step));
    }

    fn run_step(&mut self, step: Step, at: Instant) -> Result<()> {
        let timing = &self.config.timing;
        match step {
            Step::HideTraining => {
                self.slides.hide(Panel::Training, &mut self.surface);
                let due = at + timing.training_exit();
                self.schedule(due, Step::StartTrials);
            }
            Step::StartTrials => self.present_next()?,
            Step::ClearStage => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.clear(&mut self.surface);
                }
                let due = at + timing.inter_trial();
                self.schedule(due, Step::NextTrial);
            }
            Step::NextTrial => {
                let complete = self.engine.as_ref().map_or(true, |e| e.session().is_complete());
                if complete {
                    self.finish();
                } else {
                    self.present_next()?;
                }
            }
        }
        Ok(())
    }

    fn present_next(&mut self) -> Result<()> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(BookError::WrongPhase(self.phase.name()))?;
        engine.start_next_trial(&mut self.trial_rng, &mut self.surface)?;
        if self.phase != Phase::Stage {
            self.slides.show_slide(Panel::Stage, &mut self.surface);
            self.phase = Phase::Stage;
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.slides.show_slide(Panel::Finished, &mut self.surface);
        self.phase = Phase::Finished;
        if let Some(engine) = &self.engine {
            tracing::info!(
                subject = %engine.session().subject(),
                trials = engine.session().counter(),
                "Session finished"
            );
        }
    }

    /// Time left before the pending timer fires (zero when overdue)
    pub fn time_to_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline().map(|due| due.saturating_duration_since(now))
    }
}
