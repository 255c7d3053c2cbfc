//! Debug-draw sink the world renders its state into.
//!
//! The solver never owns a graphics device; callers implement
//! [`DebugDraw`] over whatever line renderer they have.

use crate::float::Float;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }
}

/// Receives primitive shapes from [`World::debug_draw`](crate::world::World::debug_draw).
pub trait DebugDraw<F: Float> {
    fn draw_line(&mut self, p0: Vec3<F>, p1: Vec3<F>, color: Color);

    /// Axis-aligned box given by its center and half extents.
    fn draw_box(&mut self, center: Vec3<F>, extents: Vec3<F>, color: Color);
}

/// Discards everything.
pub struct NoOpDraw;

impl<F: Float> DebugDraw<F> for NoOpDraw {
    fn draw_line(&mut self, _p0: Vec3<F>, _p1: Vec3<F>, _color: Color) {}
    fn draw_box(&mut self, _center: Vec3<F>, _extents: Vec3<F>, _color: Color) {}
}
