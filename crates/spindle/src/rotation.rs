use crate::geometry::shortest_delta;
use crate::layout::SLOT_COUNT;
use strum::Display;

/// Deltas smaller than this (degrees) count as "already there".
pub const ANGLE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rotation {
    #[strum(serialize = "clockwise")]
    Clockwise,
    #[strum(serialize = "counter-clockwise")]
    CounterClockwise,
}

impl Rotation {
    /// A zero delta resolves to clockwise.
    pub fn from_delta(delta: f64) -> Self {
        if delta > ANGLE_EPSILON {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    pub fn force(&self, delta: f64) -> f64 {
        if delta.abs() < ANGLE_EPSILON {
            return 0.0;
        }
        match self {
            Self::CounterClockwise if delta < 0.0 => delta + 360.0,
            Self::Clockwise if delta > 0.0 => delta - 360.0,
            _ => delta,
        }
    }

    pub fn agrees_with(&self, delta: f64) -> bool {
        match self {
            Self::CounterClockwise => delta >= 0.0,
            Self::Clockwise => delta <= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTargets {
    pub rotation: Rotation,
    pub angles: [Option<f64>; SLOT_COUNT],
}

/// Picks the rotation from the reference slot's shortest path and forces every other slot onto it.
pub fn resolve_targets(
    starts: &[Option<f64>; SLOT_COUNT],
    targets: &[f64; SLOT_COUNT],
    reference: usize,
) -> ResolvedTargets {
    let reference_delta = starts
        .get(reference)
        .copied()
        .flatten()
        .map(|start| shortest_delta(start, targets[reference]))
        .unwrap_or(0.0);
    let rotation = Rotation::from_delta(reference_delta);

    let angles = std::array::from_fn(|i| {
        starts[i].map(|start| start + rotation.force(shortest_delta(start, targets[i])))
    });

    ResolvedTargets { rotation, angles }
}
