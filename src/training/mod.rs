pub mod game;
pub mod markers;

pub use game::{ClearOutcome, TrainingGame, TrainingState};
pub use markers::{place_markers, Marker, MarkerId};
