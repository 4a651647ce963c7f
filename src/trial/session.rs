//! Per-participant session state

use serde::Serialize;
use std::fmt;

use crate::core::config::DEBUG_SUBJECT;
use crate::core::error::{BookError, Result};

/// Subject identifier typed in by the experimenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectId(String);

impl SubjectId {
    /// Accept any non-empty entry, kept exactly as typed
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(BookError::EmptySubjectId);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Results go to the experimenter's screen, not the collector
    pub fn is_debug(&self) -> bool {
        self.0 == DEBUG_SUBJECT
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subject plus the trial counter.
///
/// The counter starts at 0 and is advanced exactly once per completed trial;
/// it ends equal to `trial_count`.
#[derive(Debug, Clone)]
pub struct Session {
    subject: SubjectId,
    counter: usize,
    trial_count: usize,
    seed: u64,
}

impl Session {
    pub fn new(subject: SubjectId, trial_count: usize, seed: u64) -> Self {
        Self {
            subject,
            counter: 0,
            trial_count,
            seed,
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_complete(&self) -> bool {
        self.counter >= self.trial_count
    }

    pub(crate) fn advance(&mut self) {
        self.counter += 1;
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
