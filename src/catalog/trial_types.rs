//! Trial types: sentence connective crossed with a left/right display pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::BookError;
use crate::core::types::{Condition, Side};

/// Display conditions of the two books, written `left/right` (e.g. `and/noun`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayPair {
    pub left: Condition,
    pub right: Condition,
}

impl DisplayPair {
    pub fn new(left: Condition, right: Condition) -> Self {
        Self { left, right }
    }

    pub fn side(&self, side: Side) -> Condition {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl fmt::Display for DisplayPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.left, self.right)
    }
}

impl FromStr for DisplayPair {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s
            .split_once('/')
            .ok_or_else(|| BookError::UnknownCondition(s.to_string()))?;
        Ok(Self::new(left.parse()?, right.parse()?))
    }
}

impl TryFrom<String> for DisplayPair {
    type Error = BookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DisplayPair> for String {
    fn from(pair: DisplayPair) -> Self {
        pair.to_string()
    }
}

/// One row of the counterbalancing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialType {
    /// Drives the cue sentence
    pub connective: Condition,
    /// Drives what each book shows
    pub display: DisplayPair,
}

impl TrialType {
    pub fn new(connective: Condition, display: DisplayPair) -> Self {
        Self { connective, display }
    }

    /// Parse from the string form used in catalog files
    pub fn parse(connective: &str, display: &str) -> Result<Self, BookError> {
        Ok(Self::new(connective.parse()?, display.parse()?))
    }
}

/// The three display pairs used by the experiment
pub fn standard_displays() -> [DisplayPair; 3] {
    [
        DisplayPair::new(Condition::And, Condition::Or),
        DisplayPair::new(Condition::And, Condition::Noun),
        DisplayPair::new(Condition::Or, Condition::Noun),
    ]
}

/// Every connective crossed with every standard display pair, repeated
/// `blocks` times (the lab's session uses 4 blocks, 36 trials)
pub fn crossed_trial_types(blocks: usize) -> Vec<TrialType> {
    let mut types = Vec::with_capacity(blocks * 9);
    for _ in 0..blocks {
        for connective in Condition::ALL {
            for display in standard_displays() {
                types.push(TrialType::new(connective, display));
            }
        }
    }
    types
}

/// The lab's standard 36 trial types, unshuffled
pub fn builtin_trial_types() -> Vec<TrialType> {
    crossed_trial_types(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pair_round_trip() {
        let pair: DisplayPair = "and/noun".parse().unwrap();
        assert_eq!(pair.left, Condition::And);
        assert_eq!(pair.right, Condition::Noun);
        assert_eq!(pair.to_string(), "and/noun");
        assert_eq!(pair.side(Side::Right), Condition::Noun);
    }

    #[test]
    fn test_display_pair_rejects_garbage() {
        assert!(matches!(
            "and".parse::<DisplayPair>(),
            Err(BookError::UnknownCondition(_))
        ));
        assert!(matches!(
            "and/both".parse::<DisplayPair>(),
            Err(BookError::UnknownCondition(s)) if s == "both"
        ));
    }

    #[test]
    fn test_builtin_trial_types_balanced() {
        let types = builtin_trial_types();
        assert_eq!(types.len(), 36);
        for connective in Condition::ALL {
            for display in standard_displays() {
                let n = types
                    .iter()
                    .filter(|t| t.connective == connective && t.display == display)
                    .count();
                assert_eq!(n, 4, "{} {}", connective, display);
            }
        }
    }

    #[test]
    fn test_trial_type_serde_uses_slash_form() {
        let t = TrialType::parse("or", "or/noun").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"connective":"or","display":"or/noun"}"#);
        let back: TrialType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
