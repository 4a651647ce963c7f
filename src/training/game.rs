//! Training mini-game: tap every marker once

use rand::Rng;

use super::markers::{place_markers, Marker, MarkerId};
use crate::core::config::TrainingConfig;
use crate::core::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    Idle,
    Placing,
    AwaitingClears { remaining: usize },
    Done,
}

/// What a marker activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Unknown marker, already cleared, or not accepting input
    Ignored,
    Cleared { remaining: usize },
    /// That was the last marker
    Completed,
}

#[derive(Debug)]
pub struct TrainingGame {
    state: TrainingState,
    markers: Vec<Marker>,
    cleared: Vec<bool>,
}

impl Default for TrainingGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingGame {
    pub fn new() -> Self {
        Self {
            state: TrainingState::Idle,
            markers: Vec::new(),
            cleared: Vec::new(),
        }
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_cleared(&self, id: MarkerId) -> bool {
        self.position(id).is_some_and(|i| self.cleared[i])
    }

    fn position(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    /// Place fresh markers and start waiting for taps
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &TrainingConfig) -> Result<&[Marker]> {
        self.state = TrainingState::Placing;
        let markers = match place_markers(rng, config) {
            Ok(markers) => markers,
            Err(e) => {
                self.state = TrainingState::Idle;
                return Err(e);
            }
        };

        self.cleared = vec![false; markers.len()];
        self.markers = markers;
        self.state = TrainingState::AwaitingClears {
            remaining: self.markers.len(),
        };
        tracing::debug!(markers = self.markers.len(), "Training markers placed");
        Ok(&self.markers)
    }

    /// Register a tap on marker `id`; each marker counts once
    pub fn clear(&mut self, id: MarkerId) -> ClearOutcome {
        let TrainingState::AwaitingClears { remaining } = self.state else {
            return ClearOutcome::Ignored;
        };
        let Some(i) = self.position(id) else {
            return ClearOutcome::Ignored;
        };
        if self.cleared[i] {
            return ClearOutcome::Ignored;
        }

        self.cleared[i] = true;
        let remaining = remaining - 1;
        if remaining == 0 {
            self.state = TrainingState::Done;
            ClearOutcome::Completed
        } else {
            self.state = TrainingState::AwaitingClears { remaining };
            ClearOutcome::Cleared { remaining }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::session_rng;

    #[test]
    fn test_full_training_run() {
        let (mut rng, _) = session_rng(Some(42));
        let mut game = TrainingGame::new();
        assert_eq!(game.state(), TrainingState::Idle);

        let ids: Vec<MarkerId> = game
            .start(&mut rng, &TrainingConfig::default())
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(game.state(), TrainingState::AwaitingClears { remaining: 5 });

        assert_eq!(game.clear(ids[2]), ClearOutcome::Cleared { remaining: 4 });
        // Double tap on a crossed-out marker counts for nothing
        assert_eq!(game.clear(ids[2]), ClearOutcome::Ignored);
        assert!(game.is_cleared(ids[2]));
        assert_eq!(game.clear(MarkerId(99)), ClearOutcome::Ignored);

        for id in [ids[0], ids[1], ids[3]] {
            assert!(matches!(game.clear(id), ClearOutcome::Cleared { .. }));
        }
        assert_eq!(game.clear(ids[4]), ClearOutcome::Completed);
        assert_eq!(game.state(), TrainingState::Done);
        assert_eq!(game.clear(ids[0]), ClearOutcome::Ignored);
    }

    #[test]
    fn test_clear_before_start_ignored() {
        let mut game = TrainingGame::new();
        assert_eq!(game.clear(MarkerId(1)), ClearOutcome::Ignored);
    }

    #[test]
    fn test_failed_placement_returns_to_idle() {
        let (mut rng, _) = session_rng(Some(5));
        let config = TrainingConfig {
            marker_count: 3,
            width: 10,
            height: 10,
            min_distance: 100,
            max_placement_attempts: 10,
        };
        let mut game = TrainingGame::new();
        assert!(game.start(&mut rng, &config).is_err());
        assert_eq!(game.state(), TrainingState::Idle);
    }
}
