//! Result line emitted once per answered trial

use serde::Serialize;
use std::fmt;

use crate::catalog::DisplayPair;
use crate::core::types::{Condition, Side};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
    pub subject_id: String,
    /// 1-based
    pub trial_number: usize,
    pub item1: String,
    pub item2: String,
    pub word_type: Condition,
    pub display_type: DisplayPair,
    pub side: Side,
    /// Display condition of the chosen book
    pub response: Condition,
}

impl TrialRecord {
    /// `subjectID,trialNumber,item1,item2,wordType,displayType,side,response\n`
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for TrialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.subject_id,
            self.trial_number,
            self.item1,
            self.item2,
            self.word_type,
            self.display_type,
            self.side,
            self.response
        )
    }
}
