use glam::DQuat;
use shared::domain::{MotionSample, OrientationReading};

/// Fraction of the remaining distance the displayed rotation covers per frame.
pub const BLEND_FACTOR: f64 = 0.15;

/// Euler rotation in radians, applied in intrinsic Z, then X, then Y order.
///
/// `x` carries the device's front-back tilt (beta), `y` its left-right tilt
/// (gamma) and `z` its compass heading (alpha).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationTarget {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationTarget {
    /// `None` unless all three angles are known.
    pub fn from_orientation(orientation: &OrientationReading) -> Option<Self> {
        let alpha = orientation.alpha?;
        let beta = orientation.beta?;
        let gamma = orientation.gamma?;
        Some(Self {
            x: beta.to_radians(),
            y: gamma.to_radians(),
            z: alpha.to_radians(),
        })
    }

    pub fn to_quat(&self) -> DQuat {
        DQuat::from_rotation_z(self.z) * DQuat::from_rotation_x(self.x) * DQuat::from_rotation_y(self.y)
    }
}

/// Holds the most recent rotation target derived from relayed samples.
#[derive(Debug, Clone, Default)]
pub struct OrientationMapper {
    target: RotationTarget,
}

impl OrientationMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the target moved. Samples without a complete
    /// orientation keep the previous target.
    pub fn apply(&mut self, sample: Option<&MotionSample>) -> bool {
        let next = sample
            .and_then(|sample| sample.orientation.as_ref())
            .and_then(RotationTarget::from_orientation);
        match next {
            Some(target) => {
                self.target = target;
                true
            }
            None => false,
        }
    }

    pub fn target(&self) -> RotationTarget {
        self.target
    }
}

/// The rotation actually on screen, eased toward the target every frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayedRotation {
    current: RotationTarget,
}

impl DisplayedRotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, target: &RotationTarget) -> RotationTarget {
        let current = &mut self.current;
        current.x += (target.x - current.x) * BLEND_FACTOR;
        current.y += (target.y - current.y) * BLEND_FACTOR;
        current.z += (target.z - current.z) * BLEND_FACTOR;
        *current
    }

    pub fn current(&self) -> RotationTarget {
        self.current
    }
}

#[cfg(test)]
#[path = "tests/orientation_tests.rs"]
mod tests;
