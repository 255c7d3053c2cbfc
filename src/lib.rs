//! Fixed-timestep Verlet particle world with relaxation constraints.
//!
//! `pointmass` advances a set of point masses under gravity and resolves
//! springs, fixed anchors and plane/box contacts by iterative relaxation.
//! It is a small deterministic solver meant to sit inside a game loop, not
//! a general physics engine.
//!
//! # Features
//!
//! - **Fixed-step accumulator**: variable frame times become whole substeps,
//!   with an optional per-update ceiling
//! - **Verlet integration**: implicit velocity, drag, teleport by overwriting
//!   both positions
//! - **Relaxation solver**: springs weighted by inverse mass, absolute pins,
//!   plane and oriented-box contacts, repeated `iterations` times per substep
//! - **Checked handles**: constraints refer to particles through
//!   generation-checked handles, so use after release is an error
//! - **Composites**: `add_cube` wires eight particles with 32 springs
//! - **Observable**: `StepObserver` hooks, `DebugDraw` output, `tracing` events
//! - **`no_std` compatible**: needs only `alloc`
//!
//! ```
//! use pointmass::{Constraint, Particle, Plane, Settings, Vec3, World};
//!
//! let mut world: World<f32> = World::with_settings(Settings::new().with_iterations(4))?;
//! let ground = world.add_physics_plane(Plane::ground(0.0));
//! world.add_cube(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0, false)?;
//! world.collide_all_with_plane(ground)?;
//!
//! let ball = world.add_particle(Particle::new(Vec3::new(2.0, 1.0, 0.0), 1.0));
//! world.add_constraint(Constraint::fixed(ball, Vec3::new(2.0, 1.0, 0.0)));
//!
//! for _ in 0..60 {
//!     world.update(1.0 / 60.0)?;
//! }
//! assert_eq!(world.particle(ball)?.pos, Vec3::new(2.0, 1.0, 0.0));
//! # Ok::<(), pointmass::PhysicsError>(())
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod arena;
pub mod shape;
pub mod constraint;
pub mod config;
pub mod cube;
pub mod world;
pub mod debug_draw;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use arena::{ParticleArena, ParticleHandle};
pub use shape::{Obb, ObbId, Plane, PlaneId};
pub use constraint::{BoxCollision, Constraint, Fixed, PlaneCollision, Spring};
pub use config::Settings;
pub use cube::{add_cube, CubeConfig, CubeHandles};
pub use world::{ConstraintId, World};
pub use debug_draw::{Color, DebugDraw, NoOpDraw};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::PhysicsError;
