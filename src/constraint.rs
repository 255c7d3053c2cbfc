//! Positional constraints: springs, fixed anchors, plane and box contacts.
//!
//! Each constraint performs one Gauss-Seidel correction per call, reading
//! the positions already moved by constraints earlier in the same pass.
//! Application order therefore matters; the world applies constraints in
//! registration order.

use crate::arena::{ParticleArena, ParticleHandle};
use crate::debug_draw::{Color, DebugDraw};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::shape::{Obb, ObbId, Plane, PlaneId};
use crate::vec::{Vec, Vec3};

/// A constraint owned by a [`World`](crate::world::World).
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint<F: Float> {
    Spring(Spring<Vec3<F>>),
    Fixed(Fixed<Vec3<F>>),
    Plane(PlaneCollision),
    Box(BoxCollision),
}

/// Soft distance constraint between two particles.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<V: Vec> {
    pub a: ParticleHandle,
    pub b: ParticleHandle,
    pub rest_length: V::Scalar,
    /// Fraction of the violation removed per application, in [0, 1].
    pub stiffness: V::Scalar,
    /// Stretch ratio (current / rest) past which the spring counts as broken.
    pub break_ratio: Option<V::Scalar>,
}

/// Pins one particle to a world position.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixed<V: Vec> {
    pub particle: ParticleHandle,
    pub anchor: V,
}

/// Keeps a particle on the open side of a registered plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneCollision {
    pub particle: ParticleHandle,
    pub plane: PlaneId,
}

/// Keeps a particle outside a registered oriented box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxCollision {
    pub particle: ParticleHandle,
    pub obb: ObbId,
}

impl<F: Float> Constraint<F> {
    pub fn spring(a: ParticleHandle, b: ParticleHandle, rest_length: F) -> Self {
        Constraint::Spring(Spring::new(a, b, rest_length))
    }

    pub fn fixed(particle: ParticleHandle, anchor: Vec3<F>) -> Self {
        Constraint::Fixed(Fixed::new(particle, anchor))
    }

    pub fn plane(particle: ParticleHandle, plane: PlaneId) -> Self {
        Constraint::Plane(PlaneCollision { particle, plane })
    }

    pub fn obb(particle: ParticleHandle, obb: ObbId) -> Self {
        Constraint::Box(BoxCollision { particle, obb })
    }

    /// One corrective pass. Fails on a stale particle handle or an unknown
    /// primitive id; positions are left untouched in that case.
    pub fn apply(
        &self,
        particles: &mut ParticleArena<Vec3<F>>,
        planes: &[Plane<F>],
        obbs: &[Obb<F>],
    ) -> Result<(), PhysicsError> {
        match self {
            Constraint::Spring(c) => c.apply(particles),
            Constraint::Fixed(c) => c.apply(particles),
            Constraint::Plane(c) => {
                let plane = planes.get(c.plane.0).ok_or(PhysicsError::UnknownPlane(c.plane.0))?;
                c.apply(particles.get_mut(c.particle)?, plane);
                Ok(())
            }
            Constraint::Box(c) => {
                let obb = obbs.get(c.obb.0).ok_or(PhysicsError::UnknownObb(c.obb.0))?;
                c.apply(particles.get_mut(c.particle)?, obb);
                Ok(())
            }
        }
    }

    /// Fails with the error [`apply`](Self::apply) would report if any
    /// particle handle or primitive id named here is no longer live.
    pub fn validate(
        &self,
        particles: &ParticleArena<Vec3<F>>,
        planes: &[Plane<F>],
        obbs: &[Obb<F>],
    ) -> Result<(), PhysicsError> {
        match self {
            Constraint::Spring(c) => {
                particles.get(c.a)?;
                particles.get(c.b)?;
                if c.a.index() == c.b.index() {
                    return Err(PhysicsError::StaleHandle(c.b));
                }
            }
            Constraint::Fixed(c) => {
                particles.get(c.particle)?;
            }
            Constraint::Plane(c) => {
                planes.get(c.plane.0).ok_or(PhysicsError::UnknownPlane(c.plane.0))?;
                particles.get(c.particle)?;
            }
            Constraint::Box(c) => {
                obbs.get(c.obb.0).ok_or(PhysicsError::UnknownObb(c.obb.0))?;
                particles.get(c.particle)?;
            }
        }
        Ok(())
    }

    /// True if the constraint mentions `handle`.
    pub fn references(&self, handle: ParticleHandle) -> bool {
        match self {
            Constraint::Spring(c) => c.a == handle || c.b == handle,
            Constraint::Fixed(c) => c.particle == handle,
            Constraint::Plane(c) => c.particle == handle,
            Constraint::Box(c) => c.particle == handle,
        }
    }

    /// Breakable springs stretched past their ratio. Other variants never break.
    pub fn is_broken(&self, particles: &ParticleArena<Vec3<F>>) -> Result<bool, PhysicsError> {
        match self {
            Constraint::Spring(c) => c.is_broken(particles),
            _ => Ok(false),
        }
    }

    pub fn debug_draw<D: DebugDraw<F>>(
        &self,
        particles: &ParticleArena<Vec3<F>>,
        planes: &[Plane<F>],
        obbs: &[Obb<F>],
        draw: &mut D,
    ) -> Result<(), PhysicsError> {
        let marker = Vec3::splat(F::from_f32(0.05));
        match self {
            Constraint::Spring(c) => {
                let a = particles.get(c.a)?.pos;
                let b = particles.get(c.b)?.pos;
                draw.draw_line(a, b, Color::GREEN);
            }
            Constraint::Fixed(c) => {
                let p = particles.get(c.particle)?.pos;
                draw.draw_box(c.anchor, marker, Color::RED);
                if p != c.anchor {
                    draw.draw_line(p, c.anchor, Color::RED);
                }
            }
            Constraint::Plane(c) => {
                let plane = planes.get(c.plane.0).ok_or(PhysicsError::UnknownPlane(c.plane.0))?;
                let p = particles.get(c.particle)?;
                if plane.signed_distance(p.pos) <= p.radius {
                    draw.draw_box(p.pos, marker, Color::ORANGE);
                }
            }
            Constraint::Box(c) => {
                let obb = obbs.get(c.obb.0).ok_or(PhysicsError::UnknownObb(c.obb.0))?;
                let p = particles.get(c.particle)?;
                if box_contact(obb, p.pos, p.radius).is_some() {
                    draw.draw_box(p.pos, marker, Color::ORANGE);
                }
            }
        }
        Ok(())
    }
}

impl<V: Vec> Spring<V> {
    pub fn new(a: ParticleHandle, b: ParticleHandle, rest_length: V::Scalar) -> Self {
        Spring {
            a,
            b,
            rest_length,
            stiffness: V::Scalar::one(),
            break_ratio: None,
        }
    }

    /// A spring whose rest length is the particles' current separation.
    pub fn between(
        particles: &ParticleArena<V>,
        a: ParticleHandle,
        b: ParticleHandle,
    ) -> Result<Self, PhysicsError> {
        let rest_length = particles.get(a)?.pos.distance(particles.get(b)?.pos);
        Ok(Self::new(a, b, rest_length))
    }

    pub fn with_stiffness(mut self, stiffness: V::Scalar) -> Self {
        self.stiffness = stiffness.clamp(V::Scalar::zero(), V::Scalar::one());
        self
    }

    pub fn breakable(mut self, ratio: V::Scalar) -> Self {
        self.break_ratio = Some(ratio);
        self
    }

    /// Move both ends toward the rest length, each by its share of the
    /// total inverse mass. Two immovable ends, or coincident ends, are left
    /// alone.
    pub fn apply(&self, particles: &mut ParticleArena<V>) -> Result<(), PhysicsError> {
        let (pa, pb) = particles.pair_mut(self.a, self.b)?;
        let w_total = pa.inv_mass + pb.inv_mass;
        if w_total.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return Ok(());
        }

        let delta = pb.pos - pa.pos;
        let dist = delta.length();
        if dist.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return Ok(());
        }

        let error = dist - self.rest_length;
        let correction = delta.scale(error * self.stiffness / dist);

        pa.pos = pa.pos + correction.scale(pa.inv_mass / w_total);
        pb.pos = pb.pos - correction.scale(pb.inv_mass / w_total);
        Ok(())
    }

    pub fn current_length(&self, particles: &ParticleArena<V>) -> Result<V::Scalar, PhysicsError> {
        Ok(particles.get(self.a)?.pos.distance(particles.get(self.b)?.pos))
    }

    pub fn is_broken(&self, particles: &ParticleArena<V>) -> Result<bool, PhysicsError> {
        let Some(ratio) = self.break_ratio else {
            return Ok(false);
        };
        Ok(self.current_length(particles)? > self.rest_length * ratio)
    }
}

impl<V: Vec> Fixed<V> {
    pub fn new(particle: ParticleHandle, anchor: V) -> Self {
        Fixed { particle, anchor }
    }

    /// Pin at the anchor regardless of mass; no velocity survives.
    pub fn apply(&self, particles: &mut ParticleArena<V>) -> Result<(), PhysicsError> {
        particles.get_mut(self.particle)?.set_position(self.anchor);
        Ok(())
    }
}

impl PlaneCollision {
    pub fn apply<F: Float>(&self, p: &mut Particle<Vec3<F>>, plane: &Plane<F>) {
        if p.is_immovable() {
            return;
        }
        let depth = p.radius - plane.signed_distance(p.pos);
        if depth > F::zero() {
            resolve_contact(p, plane.normal, depth, plane.restitution, plane.friction);
        }
    }
}

impl BoxCollision {
    pub fn apply<F: Float>(&self, p: &mut Particle<Vec3<F>>, obb: &Obb<F>) {
        if p.is_immovable() {
            return;
        }
        if let Some((normal, depth)) = box_contact(obb, p.pos, p.radius) {
            resolve_contact(p, normal, depth, obb.restitution, obb.friction);
        }
    }
}

/// Exit normal and depth for a sphere of `radius` at `point` overlapping
/// the box, taken along the axis of least penetration.
fn box_contact<F: Float>(obb: &Obb<F>, point: Vec3<F>, radius: F) -> Option<(Vec3<F>, F)> {
    let local = obb.to_local(point);
    let coords = [local.x, local.y, local.z];
    let extents = [obb.half_extents.x, obb.half_extents.y, obb.half_extents.z];

    let mut best: Option<(usize, F)> = None;
    for axis in 0..3 {
        let depth = extents[axis] + radius - coords[axis].abs();
        if depth <= F::zero() {
            return None;
        }
        if best.map_or(true, |(_, d)| depth < d) {
            best = Some((axis, depth));
        }
    }

    best.map(|(axis, depth)| {
        let normal = if coords[axis] < F::zero() {
            -obb.axes[axis]
        } else {
            obb.axes[axis]
        };
        (normal, depth)
    })
}

/// Push the particle out along `normal` and rewrite its implicit velocity:
/// the approaching normal part is reflected by `restitution`, the tangential
/// part loses `friction` of its magnitude.
fn resolve_contact<F: Float>(
    p: &mut Particle<Vec3<F>>,
    normal: Vec3<F>,
    depth: F,
    restitution: F,
    friction: F,
) {
    let velocity = p.velocity_raw();
    let vn = velocity.dot(normal);
    let tangential = velocity - normal.scale(vn);
    let vn_out = if vn < F::zero() { -vn * restitution } else { vn };
    let new_velocity = tangential.scale(F::one() - friction) + normal.scale(vn_out);

    p.pos = p.pos + normal.scale(depth);
    p.prev_pos = p.pos - new_velocity;
}
