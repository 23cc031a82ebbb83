use crate::{Point, UnitVec3};

/// A ray with an origin and a unit direction; immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Point,
    direction: UnitVec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Point, direction: UnitVec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> UnitVec3 {
        self.direction
    }

    /// Point along the ray at parameter t: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Point {
        self.origin + t * self.direction
    }
}
