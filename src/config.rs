//! Simulation settings for a [`World`](crate::world::World).

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings supplied once through `World::setup` before the first update.
///
/// # Builder Pattern
/// ```
/// use pointmass::config::Settings;
/// use pointmass::vec::Vec3;
///
/// let settings: Settings<f32> = Settings::new()
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_time_step(1.0 / 120.0)
///     .with_iterations(4)
///     .with_max_substeps(8);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings<F: Float> {
    /// Uniform acceleration applied to every particle. Default: (0, -9.81, 0).
    pub gravity: Vec3<F>,
    /// Fixed substep length in seconds. Default: 1/60.
    pub time_step: F,
    /// Fraction of implicit velocity removed each substep, in [0, 1]. Default: 0.
    pub drag: F,
    /// Relaxation passes over the constraint list per substep. Default: 1.
    pub iterations: usize,
    /// Ceiling on substeps run by one `update`; `None` runs every substep
    /// that is due. Time beyond the ceiling stays in the accumulator.
    pub max_substeps: Option<usize>,
}

impl<F: Float> Settings<F> {
    pub fn new() -> Self {
        Settings {
            gravity: Vec3::new(F::zero(), F::from_f32(-9.81), F::zero()),
            time_step: F::one() / F::from_f32(60.0),
            drag: F::zero(),
            iterations: 1,
            max_substeps: None,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_substeps(mut self, max_substeps: usize) -> Self {
        self.max_substeps = Some(max_substeps);
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.time_step.is_finite() || self.time_step <= F::zero() {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !self.drag.is_finite() || self.drag < F::zero() || self.drag > F::one() {
            return Err(PhysicsError::InvalidDrag);
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity);
        }
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidIterations);
        }
        if self.max_substeps == Some(0) {
            return Err(PhysicsError::InvalidMaxSubsteps);
        }
        Ok(())
    }
}

impl<F: Float> Default for Settings<F> {
    fn default() -> Self {
        Self::new()
    }
}
