//! Math kernel for the strata path tracer.
//!
//! Re-exports glam as the vector backbone and adds the tracer-specific
//! vocabulary on top: unit-length direction vectors, closed intervals,
//! axis-aligned bounding boxes, rays, and a seeded thread-local RNG.

// Re-export the vector type everything is built on
pub use glam::Vec3;

mod aabb;
mod interval;
mod ray;
pub mod rng;
mod unit;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use unit::{near_zero, reflect, refract, scatter_around, UnitVec3};

/// RGB color with linear components in `[0, +inf)`.
pub type Color = Vec3;

/// World-space position.
pub type Point = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_reexport() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_color_alias_arithmetic() {
        let a = Color::new(0.5, 0.5, 0.5);
        let b = Color::new(0.2, 0.4, 0.6);
        assert_eq!(a * b, Color::new(0.1, 0.2, 0.3));
    }
}
