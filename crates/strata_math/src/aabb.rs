use crate::{Interval, Point, Ray};

/// Axis-aligned bounding box: one interval per axis.
///
/// Boxes may be empty or degenerate (zero volume) by construction; the BVH
/// build treats those as contributing nothing to a union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three axis intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB spanning two corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB that encloses two other AABBs.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Interval of the given axis (0 = X, 1 = Y, 2 = Z).
    ///
    /// Panics on an axis index of 3 or more; that is a caller bug.
    pub fn axis(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis index out of bounds for Aabb: {n}"),
        }
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Total surface area, or 0 for an empty box.
    pub fn surface_area(&self) -> f32 {
        if self.x.is_empty() || self.y.is_empty() || self.z.is_empty() {
            return 0.0;
        }
        let dx = self.x.size();
        let dy = self.y.size();
        let dz = self.z.size();
        2.0 * (dx * dy + dy * dz + dx * dz)
    }

    /// Index (0 = X, 1 = Y, 2 = Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let dx = self.x.size();
        let dy = self.y.size();
        let dz = self.z.size();

        if dx > dy && dx > dz {
            0
        } else if dy > dz {
            1
        } else {
            2
        }
    }

    /// True if any axis is empty or thinner than 1e-4.
    pub fn is_degenerate(&self) -> bool {
        if self.x.is_empty() || self.y.is_empty() || self.z.is_empty() {
            return true;
        }
        const NEAR_ZERO: f32 = 1e-4;
        self.x.size() < NEAR_ZERO || self.y.size() < NEAR_ZERO || self.z.size() < NEAR_ZERO
    }

    /// Slab test: does `ray` pass through the box within the `t` window?
    ///
    /// The window is tightened axis by axis; the caller's interval is copied,
    /// not mutated.
    pub fn ray_hit(&self, ray: &Ray, mut t: Interval) -> bool {
        let origin = ray.origin();
        let direction = ray.direction().get();

        for axis in 0..3 {
            let bounds = self.axis(axis);
            let inv = 1.0 / direction[axis];

            let mut t0 = (bounds.min - origin[axis]) * inv;
            let mut t1 = (bounds.max - origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t.min = t.min.max(t0);
            t.max = t.max.min(t1);
            if t.max <= t.min {
                return false;
            }
        }
        true
    }

    /// A box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
