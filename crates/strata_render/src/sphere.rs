//! Sphere primitive.

use crate::material::Material;
use crate::primitive::HitRecord;
use strata_math::{Aabb, Interval, Point, Ray, UnitVec3, Vec3};

/// A sphere with a cached bounding box.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f32,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    pub fn new(center: Point, radius: f32, material: Material) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    /// Solve `|O + tD - C|^2 = r^2` for the nearest root inside the window.
    pub fn hit(&self, ray: &Ray, t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().get().length_squared();
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root first, far root if the near one is outside the window
        let mut root = (b - sqrtd) / a;
        if !t.surrounds(root) {
            root = (b + sqrtd) / a;
            if !t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = UnitVec3::new((ray.at(root) - self.center) / self.radius);
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
