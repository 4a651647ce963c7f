//! Offline trial schedule for a seed
//!
//! Uses the same draw order as a live session (catalog shuffle, then one
//! trial after another), so the plan for seed `s` is exactly what a session
//! run with seed `s` presents.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::core::config::ExperimentConfig;
use crate::core::error::Result;
use crate::core::random::session_rng;
use crate::trial::{PreparedTrial, Session, SubjectId, TrialEngine};

#[derive(Debug, Serialize)]
pub struct SessionPlan {
    pub seed: u64,
    pub trials: Vec<PreparedTrial>,
}

pub fn plan_session(config: &ExperimentConfig, mut catalog: Catalog) -> Result<SessionPlan> {
    config.validate()?;
    let (mut rng, seed) = session_rng(config.seed);
    catalog.shuffle(&mut rng);

    let session = Session::new(SubjectId::parse("plan")?, config.trial_count, seed);
    let engine = TrialEngine::new(catalog, session, config.image_dir.clone())?;
    let trials = (0..config.trial_count)
        .map(|index| engine.prepare_trial(index, &mut rng))
        .collect::<Result<Vec<_>>>()?;

    Ok(SessionPlan { seed, trials })
}
