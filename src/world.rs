//! The simulation world: particle/constraint ownership and the fixed-step loop.

use crate::arena::{ParticleArena, ParticleHandle};
use crate::config::Settings;
use crate::constraint::Constraint;
use crate::cube::{self, CubeConfig, CubeHandles};
use crate::debug_draw::{Color, DebugDraw};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::shape::{Obb, ObbId, Plane, PlaneId};
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;
use tracing::{debug, trace, warn};

/// Position of a constraint in the world's application order.
///
/// Ids are plain indices: pruning, removing a particle or clearing
/// constraints shifts or invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Clone, Debug)]
struct Entry<F: Float> {
    constraint: Constraint<F>,
    expires_at: Option<F>,
}

/// Owns every particle, constraint and static primitive, and advances them
/// with a fixed-timestep accumulator.
///
/// Each substep resets accelerations to gravity, Verlet-integrates every
/// particle, then runs `settings.iterations` relaxation passes over the
/// constraints in registration order.
#[derive(Clone, Debug)]
pub struct World<F: Float = f32> {
    settings: Settings<F>,
    particles: ParticleArena<Vec3<F>>,
    constraints: AllocVec<Entry<F>>,
    planes: AllocVec<Plane<F>>,
    obbs: AllocVec<Obb<F>>,
    timer: F,
    world_time: F,
}

impl<F: Float> World<F> {
    pub fn new() -> Self {
        World {
            settings: Settings::new(),
            particles: ParticleArena::new(),
            constraints: AllocVec::new(),
            planes: AllocVec::new(),
            obbs: AllocVec::new(),
            timer: F::zero(),
            world_time: F::zero(),
        }
    }

    pub fn with_settings(settings: Settings<F>) -> Result<Self, PhysicsError> {
        let mut world = Self::new();
        world.setup(settings)?;
        Ok(world)
    }

    /// Replace the settings. Rejected settings leave the world unchanged.
    pub fn setup(&mut self, settings: Settings<F>) -> Result<(), PhysicsError> {
        settings.validate()?;
        debug!(
            time_step = ?settings.time_step,
            iterations = settings.iterations,
            max_substeps = ?settings.max_substeps,
            "world settings applied"
        );
        self.settings = settings;
        Ok(())
    }

    /// Advance by `delta_time` seconds. Returns the number of fixed substeps run.
    pub fn update(&mut self, delta_time: F) -> Result<usize, PhysicsError> {
        self.update_observed(delta_time, &mut NoOpStepObserver)
    }

    /// Like [`update`](Self::update), reporting progress to `observer`.
    ///
    /// Every constraint is checked against the live particles and primitives
    /// first; on failure the world is left exactly as it was.
    pub fn update_observed<O: StepObserver<F>>(
        &mut self,
        delta_time: F,
        observer: &mut O,
    ) -> Result<usize, PhysicsError> {
        if !delta_time.is_finite() || delta_time < F::zero() {
            return Err(PhysicsError::InvalidDeltaTime);
        }
        self.validate_constraints()?;

        let time_step = self.settings.time_step;
        self.timer = self.timer + delta_time;

        // Count due steps up front: once `timer` is large, subtracting a
        // single step can round back to the same value.
        let due = (self.timer / time_step).floor().to_usize();
        let substeps = match self.settings.max_substeps {
            Some(max) if due > max => {
                warn!(due, max, "substep ceiling reached, carrying time over");
                max
            }
            _ => due,
        };
        self.timer = (self.timer - time_step * F::from_usize(substeps)).max(F::zero());

        for substep in 0..substeps {
            self.accumulate_forces();
            self.integrate();
            observer.on_integrate();
            self.satisfy_constraints(observer)?;

            self.world_time = self.world_time + time_step;
            debug_assert!(
                self.particles.iter().all(|(_, p)| p.pos.is_finite()),
                "particle position diverged at world time {:?}",
                self.world_time
            );
            trace!(substep, world_time = ?self.world_time, "substep complete");
            observer.on_substep(self.world_time);
        }

        let removed = self.remove_expired()?;
        if removed > 0 {
            observer.on_expired(removed);
        }
        observer.on_step_complete(substeps);
        Ok(substeps)
    }

    fn validate_constraints(&self) -> Result<(), PhysicsError> {
        for (index, entry) in self.constraints.iter().enumerate() {
            if let Err(err) = entry.constraint.validate(&self.particles, &self.planes, &self.obbs) {
                warn!(constraint = index, error = %err, "constraint refers to a released object");
                return Err(err);
            }
        }
        Ok(())
    }

    fn accumulate_forces(&mut self) {
        let gravity = self.settings.gravity;
        for p in self.particles.iter_mut() {
            p.acceleration = gravity;
        }
    }

    fn integrate(&mut self) {
        let (time_step, drag) = (self.settings.time_step, self.settings.drag);
        for p in self.particles.iter_mut() {
            p.integrate(time_step, drag);
        }
    }

    fn satisfy_constraints<O: StepObserver<F>>(&mut self, observer: &mut O) -> Result<(), PhysicsError> {
        for i in 0..self.settings.iterations {
            for (index, entry) in self.constraints.iter().enumerate() {
                if let Err(err) = entry.constraint.apply(&mut self.particles, &self.planes, &self.obbs) {
                    warn!(constraint = index, error = %err, "constraint could not be applied");
                    return Err(err);
                }
            }
            observer.on_constraint_iteration(i);
        }
        Ok(())
    }

    /// Drop transient constraints whose lifetime has run out and breakable
    /// springs stretched past their ratio. Returns how many were removed.
    pub fn remove_expired(&mut self) -> Result<usize, PhysicsError> {
        let now = self.world_time;
        let mut keep = AllocVec::with_capacity(self.constraints.len());
        for entry in self.constraints.iter() {
            let expired = entry.expires_at.map_or(false, |t| now >= t);
            keep.push(!expired && !entry.constraint.is_broken(&self.particles)?);
        }

        let before = self.constraints.len();
        let mut flags = keep.into_iter();
        self.constraints.retain(|_| flags.next().unwrap_or(true));
        let removed = before - self.constraints.len();
        if removed > 0 {
            debug!(removed, "expired constraints pruned");
        }
        Ok(removed)
    }

    pub fn add_particle(&mut self, particle: Particle<Vec3<F>>) -> ParticleHandle {
        self.particles.insert(particle)
    }

    pub fn add_constraint(&mut self, constraint: Constraint<F>) -> ConstraintId {
        self.push_constraint(constraint, None)
    }

    /// A constraint that is pruned once `lifetime` seconds of world time have
    /// passed.
    pub fn add_constraint_for(&mut self, constraint: Constraint<F>, lifetime: F) -> ConstraintId {
        let expires_at = self.world_time + lifetime;
        self.push_constraint(constraint, Some(expires_at))
    }

    fn push_constraint(&mut self, constraint: Constraint<F>, expires_at: Option<F>) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        self.constraints.push(Entry { constraint, expires_at });
        id
    }

    pub fn add_physics_plane(&mut self, plane: Plane<F>) -> PlaneId {
        self.planes.push(plane);
        PlaneId(self.planes.len() - 1)
    }

    pub fn add_physics_obb(&mut self, obb: Obb<F>) -> ObbId {
        self.obbs.push(obb);
        ObbId(self.obbs.len() - 1)
    }

    /// Register a plane collision for every live particle. Returns the count added.
    pub fn collide_all_with_plane(&mut self, plane: PlaneId) -> Result<usize, PhysicsError> {
        if plane.0 >= self.planes.len() {
            return Err(PhysicsError::UnknownPlane(plane.0));
        }
        let handles: AllocVec<ParticleHandle> = self.particles.iter().map(|(h, _)| h).collect();
        for &h in handles.iter() {
            self.add_constraint(Constraint::plane(h, plane));
        }
        Ok(handles.len())
    }

    /// Register a box collision for every live particle. Returns the count added.
    pub fn collide_all_with_obb(&mut self, obb: ObbId) -> Result<usize, PhysicsError> {
        if obb.0 >= self.obbs.len() {
            return Err(PhysicsError::UnknownObb(obb.0));
        }
        let handles: AllocVec<ParticleHandle> = self.particles.iter().map(|(h, _)| h).collect();
        for &h in handles.iter() {
            self.add_constraint(Constraint::obb(h, obb));
        }
        Ok(handles.len())
    }

    /// Eight corner particles wired with springs; see [`cube::add_cube`].
    pub fn add_cube(
        &mut self,
        position: Vec3<F>,
        velocity: Vec3<F>,
        width: F,
        mass: F,
        fixed: bool,
    ) -> Result<CubeHandles, PhysicsError> {
        let config = CubeConfig { width, mass, fixed, ..CubeConfig::default() };
        cube::add_cube(self, position, velocity, &config)
    }

    /// Release one particle together with every constraint that references it.
    pub fn remove_particle(&mut self, handle: ParticleHandle) -> Result<Particle<Vec3<F>>, PhysicsError> {
        let particle = self.particles.remove(handle)?;
        self.constraints.retain(|entry| !entry.constraint.references(handle));
        Ok(particle)
    }

    /// Release all particles and constraints. Static primitives stay.
    pub fn clear_dynamic(&mut self) {
        self.clear_constraints();
        self.clear_particles();
    }

    /// Release all particles but keep constraints. Any constraint still
    /// referencing a released particle makes the next update fail with
    /// [`PhysicsError::StaleHandle`].
    pub fn clear_particles(&mut self) {
        if !self.particles.is_empty() {
            debug!(count = self.particles.len(), "particles cleared");
        }
        self.particles.clear();
    }

    pub fn clear_constraints(&mut self) {
        if !self.constraints.is_empty() {
            debug!(count = self.constraints.len(), "constraints cleared");
        }
        self.constraints.clear();
    }

    /// Drop planes and boxes. Collision constraints naming them will fail
    /// with `UnknownPlane`/`UnknownObb` until cleared.
    pub fn clear_static(&mut self) {
        self.planes.clear();
        self.obbs.clear();
    }

    pub fn settings(&self) -> &Settings<F> { &self.settings }
    pub fn timer(&self) -> F { self.timer }
    pub fn world_time(&self) -> F { self.world_time }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn particles(&self) -> &ParticleArena<Vec3<F>> { &self.particles }
    pub fn planes(&self) -> &[Plane<F>] { &self.planes }
    pub fn obbs(&self) -> &[Obb<F>] { &self.obbs }

    pub fn particle(&self, handle: ParticleHandle) -> Result<&Particle<Vec3<F>>, PhysicsError> {
        self.particles.get(handle)
    }

    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Result<&mut Particle<Vec3<F>>, PhysicsError> {
        self.particles.get_mut(handle)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<F>> {
        self.constraints.get(id.0).map(|entry| &entry.constraint)
    }

    /// Constraints in application order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint<F>> {
        self.constraints.iter().map(|entry| &entry.constraint)
    }

    /// Emit particles, constraints and static primitives. Reads state only.
    pub fn debug_draw<D: DebugDraw<F>>(&self, draw: &mut D) -> Result<(), PhysicsError> {
        for (_, p) in self.particles.iter() {
            draw.draw_box(p.pos, Vec3::splat(p.radius), Color::CYAN);
        }
        for entry in self.constraints.iter() {
            entry.constraint.debug_draw(&self.particles, &self.planes, &self.obbs, draw)?;
        }
        for plane in self.planes.iter() {
            draw_plane(plane, draw);
        }
        for obb in self.obbs.iter() {
            let corners = obb.corners();
            for (i, &corner) in corners.iter().enumerate() {
                for bit in [1, 2, 4] {
                    if i & bit == 0 {
                        draw.draw_line(corner, corners[i | bit], Color::YELLOW);
                    }
                }
            }
        }
        Ok(())
    }
}

/// A square patch of the plane around the point closest to the origin.
fn draw_plane<F: Float, D: DebugDraw<F>>(plane: &Plane<F>, draw: &mut D) {
    let n = plane.normal;
    let helper = if n.y.abs() < F::from_f32(0.9) { Vec3::y_axis() } else { Vec3::x_axis() };
    let half = F::from_f32(5.0);
    let u = n.cross(helper).normalize().scale(half);
    let v = n.cross(u).normalize().scale(half);
    let center = n.scale(plane.distance);
    let corners = [center + u + v, center + u - v, center - u - v, center - u + v];
    for i in 0..4 {
        draw.draw_line(corners[i], corners[(i + 1) % 4], Color::GRAY);
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        integrations: usize,
        iterations: usize,
        substep_times: AllocVec<f32>,
        completed: usize,
    }

    impl StepObserver<f32> for Counter {
        fn on_integrate(&mut self) { self.integrations += 1; }
        fn on_constraint_iteration(&mut self, _i: usize) { self.iterations += 1; }
        fn on_substep(&mut self, world_time: f32) { self.substep_times.push(world_time); }
        fn on_step_complete(&mut self, _n: usize) { self.completed += 1; }
    }

    #[test]
    fn accumulator_carries_remainder() {
        let mut world: World<f64> = World::new();
        let h = world.settings().time_step;
        assert_eq!(world.update(h * 0.5).unwrap(), 0);
        assert_eq!(world.update(h * 0.75).unwrap(), 1);
        assert!((world.timer() - h * 0.25).abs() < 1e-12);
        assert!((world.world_time() - h).abs() < 1e-12);
    }

    #[test]
    fn iterations_repeat_the_constraint_pass() {
        let settings = Settings::new().with_iterations(3);
        let mut world: World<f32> = World::with_settings(settings).unwrap();
        let mut counter = Counter::default();
        let h = world.settings().time_step;
        let n = world.update_observed(h * 2.0, &mut counter).unwrap();
        assert_eq!(n, 2);
        assert_eq!(counter.integrations, 2);
        assert_eq!(counter.iterations, 6);
        assert_eq!(counter.substep_times, [h, h + h]);
        assert_eq!(counter.completed, 1);
    }

    #[test]
    fn substep_ceiling_keeps_leftover_time() {
        let settings = Settings::new().with_time_step(0.1).with_max_substeps(2);
        let mut world: World<f64> = World::with_settings(settings).unwrap();
        assert_eq!(world.update(0.55).unwrap(), 2);
        assert!((world.timer() - 0.35).abs() < 1e-9);
        assert_eq!(world.update(0.0).unwrap(), 2);
        assert!((world.timer() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_delta() {
        let mut world: World<f32> = World::new();
        assert_eq!(world.update(-1.0), Err(PhysicsError::InvalidDeltaTime));
        assert_eq!(world.update(f32::NAN), Err(PhysicsError::InvalidDeltaTime));
    }

    #[test]
    fn setup_rejects_invalid_settings_and_keeps_old() {
        let mut world: World<f32> = World::new();
        assert!(world.setup(Settings::new().with_time_step(0.0)).is_err());
        assert!((world.settings().time_step - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn remove_particle_drops_its_constraints() {
        let mut world: World<f32> = World::new();
        let a = world.add_particle(Particle::new(Vec3::zero(), 1.0));
        let b = world.add_particle(Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0));
        let c = world.add_particle(Particle::new(Vec3::new(2.0, 0.0, 0.0), 1.0));
        world.add_constraint(Constraint::spring(a, b, 1.0));
        world.add_constraint(Constraint::spring(b, c, 1.0));
        world.add_constraint(Constraint::fixed(a, Vec3::zero()));

        world.remove_particle(b).unwrap();
        assert_eq!(world.constraint_count(), 1);
        assert_eq!(world.particle_count(), 2);
        assert!(world.update(0.1).is_ok());
    }

    #[test]
    fn huge_delta_still_returns() {
        let mut world: World<f32> = World::new();
        world.add_particle(Particle::new(Vec3::zero(), 1.0));
        let h = world.settings().time_step;

        let substeps = world.update(600_000.0).unwrap();
        assert!(substeps > 35_000_000, "ran {} substeps", substeps);
        assert!(world.timer() >= 0.0 && world.timer() < h);
    }

    #[test]
    fn failed_update_leaves_world_untouched() {
        let mut world: World<f32> = World::new();
        let a = world.add_particle(Particle::new(Vec3::zero(), 1.0));
        let b = world.add_particle(Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0));
        world.add_constraint(Constraint::spring(a, b, 1.0));
        world.update(0.025).unwrap();
        let (timer, time) = (world.timer(), world.world_time());

        world.particles.remove(b).unwrap();
        let before = world.particle(a).unwrap().pos;
        let mut counter = Counter::default();
        assert_eq!(world.update_observed(1.0, &mut counter), Err(PhysicsError::StaleHandle(b)));

        assert_eq!(world.timer(), timer);
        assert_eq!(world.world_time(), time);
        assert_eq!(world.particle(a).unwrap().pos, before);
        assert_eq!(counter.integrations, 0);
    }
}
