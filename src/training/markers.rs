//! Marker placement for the training game

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::core::config::TrainingConfig;
use crate::core::error::{BookError, Result};
use crate::core::types::Point;

/// 1-based marker number (`dot_1` .. `dot_5`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub usize);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dot_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Point,
}

/// Place `marker_count` markers by rejection sampling.
///
/// Each candidate is uniform over the training region and is rejected when
/// it lies closer than `min_distance` (Manhattan) to an already placed
/// marker. A marker that cannot be placed within `max_placement_attempts`
/// draws fails the whole placement.
pub fn place_markers<R: Rng + ?Sized>(rng: &mut R, config: &TrainingConfig) -> Result<Vec<Marker>> {
    let mut markers: Vec<Marker> = Vec::with_capacity(config.marker_count);

    for index in 0..config.marker_count {
        let mut placed = None;
        for _ in 0..config.max_placement_attempts {
            let candidate = Point::new(rng.gen_range(0..config.width), rng.gen_range(0..config.height));
            let clear = markers
                .iter()
                .all(|m| m.position.manhattan(&candidate) >= config.min_distance);
            if clear {
                placed = Some(candidate);
                break;
            }
        }

        let position = placed.ok_or(BookError::MarkerPlacement {
            index,
            attempts: config.max_placement_attempts,
        })?;
        markers.push(Marker {
            id: MarkerId(index + 1),
            position,
        });
    }

    Ok(markers)
}
