//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::Vec;

/// A Verlet point mass. Velocity is implicit: `pos - prev_pos`.
///
/// An `inv_mass` of zero makes the particle immovable under spring
/// corrections. It still integrates under gravity; anchoring it in place is
/// the job of a [`Fixed`](crate::constraint::Fixed) constraint.
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    pub acceleration: V,
    pub inv_mass: V::Scalar,
    pub radius: V::Scalar,
}

impl<V: Vec> Particle<V> {
    /// A particle at rest with the given mass. A mass that is not
    /// meaningfully positive (zero, negative or NaN) produces an immovable
    /// particle.
    pub fn new(pos: V, mass: V::Scalar) -> Self {
        let inv_mass = if mass > V::Scalar::from_f32(1e-10) {
            V::Scalar::one() / mass
        } else {
            V::Scalar::zero()
        };
        Self::with_inv_mass(pos, inv_mass)
    }

    pub fn with_inv_mass(pos: V, inv_mass: V::Scalar) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            acceleration: V::zero(),
            inv_mass,
            radius: V::Scalar::from_f32(0.1),
        }
    }

    pub fn immovable(pos: V) -> Self {
        Self::with_inv_mass(pos, V::Scalar::zero())
    }

    pub fn with_radius(mut self, radius: V::Scalar) -> Self {
        self.radius = radius;
        self
    }

    pub fn is_immovable(&self) -> bool {
        self.inv_mass.is_near_zero(V::Scalar::from_f32(1e-10))
    }

    /// Teleport: both positions are overwritten so the particle arrives at rest.
    pub fn set_position(&mut self, pos: V) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Give the particle a velocity in units per second, expressed through
    /// `prev_pos` for a step of `time_step` seconds.
    pub fn set_velocity(&mut self, velocity: V, time_step: V::Scalar) {
        self.prev_pos = self.pos - velocity.scale(time_step);
    }

    /// One Verlet step. `drag` in [0, 1] removes that fraction of the
    /// implicit velocity.
    pub fn integrate(&mut self, dt: V::Scalar, drag: V::Scalar) {
        let velocity = (self.pos - self.prev_pos).scale(V::Scalar::one() - drag);
        let displacement = velocity + self.acceleration.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = self.pos + displacement;
    }

    pub fn velocity(&self, dt: V::Scalar) -> V {
        if dt.is_near_zero(V::Scalar::from_f32(1e-30)) {
            return V::zero();
        }
        (self.pos - self.prev_pos).scale(V::Scalar::one() / dt)
    }

    pub fn velocity_raw(&self) -> V {
        self.pos - self.prev_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn zero_mass_is_immovable() {
        let p = Particle::new(Vec3::new(1.0f32, 2.0, 3.0), 0.0);
        assert!(p.is_immovable());
        assert_eq!(p.inv_mass, 0.0);
    }

    #[test]
    fn non_positive_mass_is_immovable() {
        for mass in [-1.0f32, -1e-12, f32::NAN] {
            let p = Particle::new(Vec3::new(0.0f32, 0.0, 0.0), mass);
            assert_eq!(p.inv_mass, 0.0, "mass {}", mass);
            assert!(p.is_immovable());
        }
        assert_eq!(Particle::new(Vec3::<f32>::zero(), 4.0).inv_mass, 0.25);
    }

    #[test]
    fn set_position_zeroes_velocity() {
        let mut p = Particle::new(Vec3::<f32>::zero(), 1.0);
        p.set_velocity(Vec3::new(6.0, 0.0, 0.0), 0.5);
        assert_eq!(p.velocity_raw(), Vec3::new(3.0, 0.0, 0.0));
        p.set_position(Vec3::new(4.0, 4.0, 4.0));
        assert_eq!(p.velocity_raw(), Vec3::zero());
    }

    #[test]
    fn velocity_round_trips_through_prev_pos() {
        let mut p = Particle::new(Vec3::<f64>::zero(), 1.0);
        p.set_velocity(Vec3::new(0.0, -2.0, 1.0), 1.0 / 60.0);
        let v = p.velocity(1.0 / 60.0);
        assert!((v.y + 2.0).abs() < 1e-9);
        assert!((v.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn full_drag_stops_motion() {
        let mut p = Particle::new(Vec3::<f32>::zero(), 1.0);
        p.set_velocity(Vec3::new(10.0, 0.0, 0.0), 1.0);
        p.integrate(1.0, 1.0);
        assert_eq!(p.pos, Vec3::zero());
    }
}
