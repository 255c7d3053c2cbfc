//! Error types for world operations.

use thiserror::Error;

use crate::arena::ParticleHandle;

/// Errors that can occur while configuring or stepping a world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A constraint or caller used a handle whose particle has been released.
    #[error("stale particle handle {0:?}")]
    StaleHandle(ParticleHandle),
    /// Fixed time step must be positive and finite.
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    /// Drag must be in [0, 1].
    #[error("drag must be in [0, 1]")]
    InvalidDrag,
    /// At least one relaxation pass per substep.
    #[error("iterations must be at least 1")]
    InvalidIterations,
    /// A substep ceiling of zero would never advance the world.
    #[error("max substeps must be at least 1")]
    InvalidMaxSubsteps,
    /// Gravity must be finite.
    #[error("gravity must be finite")]
    InvalidGravity,
    /// Elapsed time passed to `update` must be finite and non-negative.
    #[error("delta time must be finite and non-negative")]
    InvalidDeltaTime,
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Composite widths must be positive and finite.
    #[error("width must be positive and finite")]
    InvalidWidth,
    /// Plane id does not belong to this world.
    #[error("unknown plane {0}")]
    UnknownPlane(usize),
    /// Box id does not belong to this world.
    #[error("unknown oriented box {0}")]
    UnknownObb(usize),
}
