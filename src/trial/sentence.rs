//! Cue sentence read to the child

use crate::core::types::Condition;

/// Sentence for a trial's connective.
///
/// The `and` and `or` templates are crossed: an `and` trial reads
/// "... X or Y." and an `or` trial reads "... X and Y.". Recorded data from
/// every past session uses this mapping, so it must not change.
pub fn cue_sentence(connective: Condition, label1: &str, label2: &str) -> String {
    match connective {
        Condition::And => format!("I have books about {} or {}.", label1, label2),
        Condition::Or => format!("I have books about {} and {}.", label1, label2),
        Condition::Noun => format!("I have books about {}.", label1),
    }
}
