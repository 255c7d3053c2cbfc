//! Cube composite: eight corner particles held together by springs.
//!
//! Corners are numbered around the top square (0..4, `+y`) and then the
//! bottom square (4..8, `-y`), so `i -> (i + 1) % 4` walks an edge and
//! `i -> i + 4` drops to the corner directly below:
//!
//! ```text
//!     3 ------- 2        top (y = +w/2)
//!     |         |        x grows 0 -> 1
//!     0 ------- 1        z grows 3 -> 0
//!
//!     7 ------- 6        bottom (y = -w/2)
//!     |         |
//!     4 ------- 5
//! ```
//!
//! Creates 4 kinds of springs, 32 in total:
//! - Edges: 4 top, 4 vertical, 4 bottom (rest = width)
//! - Top/bottom face diagonals: `i -> (i + 2) % 4` on each square, so each
//!   diagonal is registered from both ends (rest = width * sqrt(2))
//! - Side face diagonals: two per side face (rest = width * sqrt(2))
//! - Body diagonals: 4 (rest = width * sqrt(3))

use crate::arena::ParticleHandle;
use crate::constraint::{Constraint, Spring};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use crate::world::World;
use core::ops::Range;
use tracing::debug;

/// Options for [`add_cube`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeConfig<F: Float> {
    /// Edge length. Default: 1.
    pub width: F,
    /// Total mass, split evenly over the corners. Default: 1.
    pub mass: F,
    /// Pin every corner at its starting position. Default: false.
    pub fixed: bool,
    /// Radius of each corner particle. Default: 0.3.
    pub particle_radius: F,
    /// Stiffness of every spring. Default: 1.
    pub stiffness: F,
}

impl<F: Float> Default for CubeConfig<F> {
    fn default() -> Self {
        CubeConfig {
            width: F::one(),
            mass: F::one(),
            fixed: false,
            particle_radius: F::from_f32(0.3),
            stiffness: F::one(),
        }
    }
}

/// What [`add_cube`] registered.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeHandles {
    /// Corner particles in the order documented on this module.
    pub particles: [ParticleHandle; 8],
    /// Indices of the cube's constraints in the world's application order,
    /// valid until the constraint list is next pruned or cleared.
    pub constraints: Range<usize>,
}

pub const SPRING_COUNT: usize = 32;

/// Build a cube centered at `position`, moving with `velocity` (units per
/// second), and register its particles and constraints with `world`.
pub fn add_cube<F: Float>(
    world: &mut World<F>,
    position: Vec3<F>,
    velocity: Vec3<F>,
    config: &CubeConfig<F>,
) -> Result<CubeHandles, PhysicsError> {
    if !config.width.is_finite() || config.width <= F::zero() {
        return Err(PhysicsError::InvalidWidth);
    }
    if !config.mass.is_finite() || config.mass <= F::zero() {
        return Err(PhysicsError::InvalidMass);
    }

    let w = config.width;
    let hw = w * F::half();
    let corner_mass = config.mass / F::from_f32(8.0);
    let time_step = world.settings().time_step;

    let offsets = [(-hw, hw), (hw, hw), (hw, -hw), (-hw, -hw)];
    let mut corners = [Vec3::new(F::zero(), F::zero(), F::zero()); 8];
    for (i, &(dx, dz)) in offsets.iter().enumerate() {
        corners[i] = Vec3::new(position.x + dx, position.y + hw, position.z + dz);
        corners[i + 4] = Vec3::new(position.x + dx, position.y - hw, position.z + dz);
    }

    let particles: [ParticleHandle; 8] = core::array::from_fn(|i| {
        let mut p = Particle::new(corners[i], corner_mass).with_radius(config.particle_radius);
        p.set_velocity(velocity, time_step);
        world.add_particle(p)
    });

    let face = (w * w * F::two()).sqrt();
    let body = (w * w + face * face).sqrt();

    let first = world.constraint_count();
    let mut spring = |a: usize, b: usize, rest: F| {
        let s = Spring::new(particles[a], particles[b], rest).with_stiffness(config.stiffness);
        world.add_constraint(Constraint::Spring(s));
    };

    // Top square and verticals
    for i in 0..4 {
        spring(i, (i + 1) % 4, w);
        spring(i, i + 4, w);
    }
    // Bottom square
    for i in 0..4 {
        spring(i + 4, (i + 1) % 4 + 4, w);
    }
    // Top and bottom face diagonals
    for i in 0..4 {
        spring(i, (i + 2) % 4, face);
    }
    for i in 0..4 {
        spring(i + 4, (i + 2) % 4 + 4, face);
    }
    // Side face diagonals
    for i in 0..4 {
        let j = (i + 1) % 4;
        spring(i, j + 4, face);
        spring(j, i + 4, face);
    }
    // Body diagonals
    for i in 0..4 {
        spring(i, (i + 2) % 4 + 4, body);
    }

    if config.fixed {
        for (&handle, &anchor) in particles.iter().zip(corners.iter()) {
            world.add_constraint(Constraint::fixed(handle, anchor));
        }
    }

    let constraints = first..world.constraint_count();
    debug!(constraints = constraints.len(), fixed = config.fixed, "cube added");
    Ok(CubeHandles { particles, constraints })
}
