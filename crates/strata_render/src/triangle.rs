//! Triangle primitive using Möller-Trumbore intersection.

use crate::material::Material;
use crate::primitive::HitRecord;
use strata_math::{Aabb, Interval, Point, Ray, UnitVec3, Vec3};

/// Tolerance for the determinant, barycentric, and t-window checks.
const EPSILON: f32 = 1e-6;

/// Padding per axis so axis-aligned triangles keep a nonzero slab extent.
const BBOX_PADDING: f32 = 1e-4;

/// A double-sided triangle with a cached, padded bounding box.
#[derive(Debug, Clone)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point, material: Material) -> Self {
        let min = a.min(b).min(c) - Vec3::splat(BBOX_PADDING);
        let max = a.max(b).max(c) + Vec3::splat(BBOX_PADDING);

        Self {
            a,
            b,
            c,
            material,
            bbox: Aabb::from_points(min, max),
        }
    }

    /// Möller-Trumbore intersection; hits both faces.
    pub fn hit(&self, ray: &Ray, t: Interval) -> Option<HitRecord> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let p = ray.direction().cross(ac);
        let det = ab.dot(p);

        // Ray parallel to the triangle plane never intersects
        if det.abs() < EPSILON {
            return None;
        }

        let inv = 1.0 / det;
        let r = ray.origin() - self.a;

        let u = inv * r.dot(p);
        if u < -EPSILON || u > 1.0 + EPSILON {
            return None;
        }

        let q = r.cross(ab);
        let v = inv * ray.direction().dot(q);
        if v < -EPSILON || u + v > 1.0 + EPSILON {
            return None;
        }

        let root = inv * ac.dot(q);
        if root < t.min - EPSILON || root > t.max + EPSILON {
            return None;
        }

        let outward_normal = UnitVec3::new(ab.cross(ac));
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
