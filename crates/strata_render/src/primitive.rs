//! Hit records and the closed set of renderable primitives.

use crate::material::Material;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use strata_math::{Aabb, Interval, Point, Ray, UnitVec3};

/// One ray-surface intersection.
///
/// `normal` always faces outward from the surface; `front_face` records
/// whether the ray arrived from that side. The bounce routine flips the
/// normal when the surface was entered from behind.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    pub point: Point,
    pub normal: UnitVec3,
    pub t: f32,
    pub front_face: bool,
    pub material: Material,
}

impl HitRecord {
    /// Build a record from the outward-facing surface normal, resolving
    /// which side the ray approached from.
    pub fn new(ray: &Ray, t: f32, outward_normal: UnitVec3, material: Material) -> Self {
        let front_face = ray.direction().dot(outward_normal.get()) <= 0.0;
        Self {
            point: ray.at(t),
            normal: outward_normal,
            t,
            front_face,
            material,
        }
    }
}

/// The closed set of renderable surfaces.
///
/// An enum keeps intersection dispatch branch-predictable in the BVH's inner
/// loop and the per-primitive storage fixed-size; there is no reason to pay
/// for virtual dispatch over a set of two.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    /// Closest intersection with `ray` inside the `t` window, if any.
    pub fn hit(&self, ray: &Ray, t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, t),
            Primitive::Triangle(triangle) => triangle.hit(ray, t),
        }
    }

    /// Axis-aligned bounding box of this primitive.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(sphere) => sphere.bounding_box(),
            Primitive::Triangle(triangle) => triangle.bounding_box(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_math::{Color, Vec3};

    #[test]
    fn test_face_normal_resolution() {
        let material = Material::reflective(Color::ONE, 1.0, 0.0);
        let outward = UnitVec3::new(Vec3::Y);

        // Ray descending onto the surface: front face
        let ray = Ray::new(Point::new(0.0, 1.0, 0.0), UnitVec3::new(-Vec3::Y));
        let record = HitRecord::new(&ray, 1.0, outward, material);
        assert!(record.front_face);
        assert_eq!(record.normal.get(), Vec3::Y);

        // Ray rising through the surface from below: back face,
        // stored normal still faces outward
        let ray = Ray::new(Point::new(0.0, -1.0, 0.0), UnitVec3::new(Vec3::Y));
        let record = HitRecord::new(&ray, 1.0, outward, material);
        assert!(!record.front_face);
        assert_eq!(record.normal.get(), Vec3::Y);
    }

    #[test]
    fn test_enum_dispatch() {
        let material = Material::reflective(Color::ONE, 1.0, 0.0);
        let sphere: Primitive = Sphere::new(Point::new(0.0, 0.0, -2.0), 0.5, material).into();
        let triangle: Primitive = Triangle::new(
            Point::new(-1.0, -1.0, -2.0),
            Point::new(1.0, -1.0, -2.0),
            Point::new(0.0, 1.0, -2.0),
            material,
        )
        .into();

        let ray = Ray::new(Point::ZERO, UnitVec3::new(-Vec3::Z));
        let window = Interval::new(0.001, f32::INFINITY);

        assert!(sphere.hit(&ray, window).is_some());
        assert!(triangle.hit(&ray, window).is_some());
        assert!(!sphere.bounding_box().is_degenerate());
    }
}
