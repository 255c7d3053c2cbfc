//! Static collision primitives particles can be pushed out of.

use crate::float::Float;
use crate::vec::{Vec, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a [`Plane`] registered with a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneId(pub(crate) usize);

/// Index of an [`Obb`] registered with a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObbId(pub(crate) usize);

impl PlaneId {
    pub fn index(self) -> usize { self.0 }
}

impl ObbId {
    pub fn index(self) -> usize { self.0 }
}

/// Infinite plane `dot(normal, p) = distance`; the solid side is behind
/// the normal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane<F: Float> {
    pub normal: Vec3<F>,
    pub distance: F,
    /// Fraction of the approaching normal speed kept after contact.
    pub restitution: F,
    /// Fraction of the tangential speed removed on contact.
    pub friction: F,
}

impl<F: Float> Plane<F> {
    pub fn new(normal: Vec3<F>, distance: F) -> Self {
        Plane {
            normal: normal.normalize(),
            distance,
            restitution: F::zero(),
            friction: F::zero(),
        }
    }

    pub fn from_point_normal(point: Vec3<F>, normal: Vec3<F>) -> Self {
        let normal = normal.normalize();
        Self::new(normal, normal.dot(point))
    }

    /// Horizontal ground at `height`, solid below.
    pub fn ground(height: F) -> Self {
        Self::new(Vec3::y_axis(), height)
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn signed_distance(&self, point: Vec3<F>) -> F {
        self.normal.dot(point) - self.distance
    }
}

/// Oriented box: a center, half extents along three orthonormal axes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obb<F: Float> {
    pub center: Vec3<F>,
    pub half_extents: Vec3<F>,
    pub axes: [Vec3<F>; 3],
    pub restitution: F,
    pub friction: F,
}

impl<F: Float> Obb<F> {
    pub fn axis_aligned(center: Vec3<F>, half_extents: Vec3<F>) -> Self {
        Self::from_axes(center, half_extents, [Vec3::x_axis(), Vec3::y_axis(), Vec3::z_axis()])
    }

    /// The axes are normalized but not re-orthogonalized.
    pub fn from_axes(center: Vec3<F>, half_extents: Vec3<F>, axes: [Vec3<F>; 3]) -> Self {
        Obb {
            center,
            half_extents,
            axes: [axes[0].normalize(), axes[1].normalize(), axes[2].normalize()],
            restitution: F::zero(),
            friction: F::zero(),
        }
    }

    /// Box turned `angle` radians about the world Y axis.
    pub fn rotated_y(center: Vec3<F>, half_extents: Vec3<F>, angle: F) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Self::from_axes(
            center,
            half_extents,
            [
                Vec3::new(c, F::zero(), -s),
                Vec3::y_axis(),
                Vec3::new(s, F::zero(), c),
            ],
        )
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    /// Coordinates of `point` along the box axes, relative to its center.
    pub fn to_local(&self, point: Vec3<F>) -> Vec3<F> {
        let d = point - self.center;
        Vec3::new(d.dot(self.axes[0]), d.dot(self.axes[1]), d.dot(self.axes[2]))
    }

    pub fn to_world(&self, local: Vec3<F>) -> Vec3<F> {
        self.center
            + self.axes[0].scale(local.x)
            + self.axes[1].scale(local.y)
            + self.axes[2].scale(local.z)
    }

    /// Corners in bit order: bit 0 picks +x, bit 1 +y, bit 2 +z.
    pub fn corners(&self) -> [Vec3<F>; 8] {
        let h = self.half_extents;
        let mut out = [Vec3::zero(); 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let pick = |bit: usize, e: F| if i & bit != 0 { e } else { -e };
            *corner = self.to_world(Vec3::new(pick(1, h.x), pick(2, h.y), pick(4, h.z)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_from_point_normal() {
        let plane = Plane::from_point_normal(Vec3::new(0.0f32, 2.0, 0.0), Vec3::new(0.0, 5.0, 0.0));
        assert!((plane.distance - 2.0).abs() < 1e-6);
        assert!((plane.signed_distance(Vec3::new(3.0, 3.5, -1.0)) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn rotated_box_local_round_trip() {
        let obb = Obb::rotated_y(Vec3::new(1.0f64, 0.0, 0.0), Vec3::splat(1.0), 0.7);
        let p = Vec3::new(2.0, 0.5, -0.25);
        let back = obb.to_world(obb.to_local(p));
        assert!(back.distance(p) < 1e-9);
    }

    #[test]
    fn corners_lie_on_extents() {
        let obb = Obb::axis_aligned(Vec3::<f32>::zero(), Vec3::new(1.0, 2.0, 3.0));
        let corners = obb.corners();
        assert_eq!(corners[0], Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(corners[7], Vec3::new(1.0, 2.0, 3.0));
    }
}
