//! Bounding volume hierarchy over the scene's primitives.
//!
//! The tree is a flat arena of nodes addressing each other by index, built
//! over a primitive list the constructor takes ownership of and reorders so
//! every leaf covers a contiguous range. Splits use a binned surface-area
//! heuristic, degrading to a median split whenever the SAH has nothing
//! useful to say.

use crate::primitive::{HitRecord, Primitive};
use strata_math::{Aabb, Interval, Ray};

/// Bins used by the SAH sweep along the split axis.
const SAH_BINS: usize = 16;

/// Maximum primitives stored in a leaf.
const LEAF_MAX: usize = 2;

/// Cost of one traversal step relative to one intersection test.
const TRAVERSAL_COST: f32 = 1.0;
const INTERSECTION_COST: f32 = 1.0;

enum NodeKind {
    /// Contiguous primitive range `[start, start + count)`.
    Leaf { start: usize, count: usize },
    /// Indices of the two child nodes.
    Internal { left: usize, right: usize },
}

struct Node {
    bbox: Aabb,
    kind: NodeKind,
}

/// Binary tree of bounding boxes with every primitive stored in a leaf.
pub struct Bvh {
    primitives: Vec<Primitive>,
    nodes: Vec<Node>,
    root: usize,
}

impl Bvh {
    /// Build a BVH over `primitives`. An empty list yields an empty tree
    /// that misses every ray.
    pub fn new(primitives: Vec<Primitive>) -> Self {
        let mut bvh = Self {
            primitives,
            nodes: Vec::new(),
            root: 0,
        };
        if !bvh.primitives.is_empty() {
            let end = bvh.primitives.len();
            bvh.root = bvh.build(0, end);
        }
        bvh
    }

    /// Number of primitives in the tree.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Bounding box of the whole scene.
    pub fn bounding_box(&self) -> Aabb {
        if self.nodes.is_empty() {
            Aabb::EMPTY
        } else {
            self.nodes[self.root].bbox
        }
    }

    /// Closest hit inside the `t` window, or `None` for a miss.
    pub fn hit(&self, ray: &Ray, t: Interval) -> Option<HitRecord> {
        if self.nodes.is_empty() {
            return None;
        }
        self.hit_node(self.root, ray, t)
    }

    fn hit_node(&self, index: usize, ray: &Ray, t: Interval) -> Option<HitRecord> {
        let node = &self.nodes[index];
        if !node.bbox.ray_hit(ray, t) {
            return None;
        }

        match node.kind {
            NodeKind::Leaf { start, count } => {
                let mut closest: Option<HitRecord> = None;
                let mut window = t;
                for primitive in &self.primitives[start..start + count] {
                    if let Some(record) = primitive.hit(ray, window) {
                        window = Interval::new(t.min, record.t);
                        closest = Some(record);
                    }
                }
                closest
            }
            NodeKind::Internal { left, right } => {
                // The left hit, if any, caps the window for the right child,
                // so the closer of the two always wins.
                let hit_left = self.hit_node(left, ray, t);
                let right_max = hit_left.as_ref().map_or(t.max, |record| record.t);
                let hit_right = self.hit_node(right, ray, Interval::new(t.min, right_max));
                hit_right.or(hit_left)
            }
        }
    }

    /// Recursively build the subtree over `[start, end)`; returns its node
    /// index.
    fn build(&mut self, start: usize, end: usize) -> usize {
        let bounds = self.primitives[start..end]
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bounding_box()));

        let count = end - start;
        if count <= LEAF_MAX {
            return self.push(Node {
                bbox: bounds,
                kind: NodeKind::Leaf { start, count },
            });
        }

        let centroid_bounds = self.primitives[start..end].iter().fold(Aabb::EMPTY, |acc, p| {
            let c = p.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        // Collapsed centroids leave the SAH nothing to bin over
        let mid = if centroid_bounds.axis(axis).size() <= f32::EPSILON {
            self.median_split(start, end, axis)
        } else {
            self.sah_split(start, end, axis, &centroid_bounds, &bounds)
                .unwrap_or_else(|| self.median_split(start, end, axis))
        };

        let left = self.build(start, mid);
        let right = self.build(mid, end);
        self.push(Node {
            bbox: bounds,
            kind: NodeKind::Internal { left, right },
        })
    }

    /// Sort the range by bounding-box minimum along `axis` and cut at the
    /// median.
    fn median_split(&mut self, start: usize, end: usize, axis: usize) -> usize {
        self.primitives[start..end].sort_unstable_by(|a, b| {
            let a_min = a.bounding_box().axis(axis).min;
            let b_min = b.bounding_box().axis(axis).min;
            a_min.partial_cmp(&b_min).unwrap_or(std::cmp::Ordering::Equal)
        });
        start + (end - start) / 2
    }

    /// Binned SAH split along `axis`.
    ///
    /// Returns the partition point, or `None` when no bin boundary beats the
    /// cost of intersecting the whole range as a leaf.
    fn sah_split(
        &mut self,
        start: usize,
        end: usize,
        axis: usize,
        centroid_bounds: &Aabb,
        bounds: &Aabb,
    ) -> Option<usize> {
        let parent_area = bounds.surface_area();
        if parent_area <= 0.0 {
            return None;
        }

        let axis_bounds = centroid_bounds.axis(axis);
        let to_bin = |primitive: &Primitive| -> usize {
            let centroid = primitive.bounding_box().centroid()[axis];
            let offset = (centroid - axis_bounds.min) / axis_bounds.size();
            ((offset * SAH_BINS as f32) as usize).min(SAH_BINS - 1)
        };

        let mut bin_counts = [0usize; SAH_BINS];
        let mut bin_bounds = [Aabb::EMPTY; SAH_BINS];
        for primitive in &self.primitives[start..end] {
            let bin = to_bin(primitive);
            bin_counts[bin] += 1;
            bin_bounds[bin] = Aabb::surrounding(&bin_bounds[bin], &primitive.bounding_box());
        }

        // Prefix sweep: everything left of each bin boundary
        let mut left_counts = [0usize; SAH_BINS - 1];
        let mut left_areas = [0.0f32; SAH_BINS - 1];
        let mut acc = Aabb::EMPTY;
        let mut n = 0;
        for boundary in 0..SAH_BINS - 1 {
            acc = Aabb::surrounding(&acc, &bin_bounds[boundary]);
            n += bin_counts[boundary];
            left_counts[boundary] = n;
            left_areas[boundary] = acc.surface_area();
        }

        // Suffix sweep: everything right of each bin boundary
        let mut right_counts = [0usize; SAH_BINS - 1];
        let mut right_areas = [0.0f32; SAH_BINS - 1];
        let mut acc = Aabb::EMPTY;
        let mut n = 0;
        for boundary in (0..SAH_BINS - 1).rev() {
            acc = Aabb::surrounding(&acc, &bin_bounds[boundary + 1]);
            n += bin_counts[boundary + 1];
            right_counts[boundary] = n;
            right_areas[boundary] = acc.surface_area();
        }

        let count = end - start;
        let leaf_cost = INTERSECTION_COST * count as f32;

        let mut best: Option<(usize, f32)> = None;
        for boundary in 0..SAH_BINS - 1 {
            if left_counts[boundary] == 0 || right_counts[boundary] == 0 {
                continue;
            }
            let split_cost = TRAVERSAL_COST
                + (left_areas[boundary] * left_counts[boundary] as f32
                    + right_areas[boundary] * right_counts[boundary] as f32)
                    / parent_area
                    * INTERSECTION_COST;
            if best.map_or(true, |(_, cost)| split_cost < cost) {
                best = Some((boundary, split_cost));
            }
        }

        let (split_bin, split_cost) = best?;
        if split_cost >= leaf_cost {
            return None;
        }

        // Partition the range in place by bin index
        self.primitives[start..end].sort_unstable_by_key(&to_bin);
        let left_count = left_counts[split_bin];
        Some(start + left_count)
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}
