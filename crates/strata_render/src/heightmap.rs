//! Procedural terrain: a noise-sampled height grid triangulated into a mesh.

use crate::material::Material;
use crate::primitive::Primitive;
use crate::triangle::Triangle;
use strata_math::{rng, Color, Interval, Point};

/// A grid of vertex heights that can be turned into a triangle mesh.
///
/// Heights are sampled once at construction; the grid is anchored at
/// `corner` in world space with `grid_square_len` spacing between vertices
/// (x runs along `width`, z along `length`).
pub struct Heightmap {
    corner: Point,
    grid_square_len: f32,
    length: usize,
    width: usize,
    heights: Vec<f32>,
}

impl Heightmap {
    /// Sample `noise` at every integer grid vertex.
    pub fn new(
        noise: impl Fn(f64, f64) -> f64,
        corner: Point,
        grid_square_len: f32,
        length: usize,
        width: usize,
    ) -> Self {
        let mut heights = Vec::with_capacity(length * width);
        for z in 0..length {
            for x in 0..width {
                heights.push(corner.y + noise(x as f64, z as f64) as f32);
            }
        }

        Self {
            corner,
            grid_square_len,
            length,
            width,
            heights,
        }
    }

    /// Triangulate the grid: each grid square becomes two triangles.
    pub fn triangulate(&self) -> Vec<Primitive> {
        let quads = self.length.saturating_sub(1) * self.width.saturating_sub(1);
        let mut triangles = Vec::with_capacity(2 * quads);

        // Walk the vertices one row at a time; each visited vertex is the
        // upper-left corner of a quad.
        let mut vertex = 0;
        for z in 0..self.length.saturating_sub(1) {
            for x in 0..self.width.saturating_sub(1) {
                let left_x = self.grid_square_len * x as f32 + self.corner.x;
                let right_x = self.grid_square_len * (x + 1) as f32 + self.corner.x;
                let near_z = self.grid_square_len * z as f32 + self.corner.z;
                let far_z = self.grid_square_len * (z + 1) as f32 + self.corner.z;

                let up_left = Point::new(left_x, self.heights[vertex], near_z);
                let up_right = Point::new(right_x, self.heights[vertex + 1], near_z);
                let low_left = Point::new(left_x, self.heights[vertex + self.width], far_z);
                let low_right =
                    Point::new(right_x, self.heights[vertex + self.width + 1], far_z);

                let elevation = up_left.y;
                triangles.push(
                    Triangle::new(up_left, up_right, low_left, surface_material(elevation))
                        .into(),
                );
                triangles.push(
                    Triangle::new(up_right, low_left, low_right, surface_material(elevation))
                        .into(),
                );
                vertex += 1;
            }
            vertex += 1;
        }
        triangles
    }

    /// Sampled height of the vertex at grid coordinates (x, z).
    pub fn height(&self, x: usize, z: usize) -> f32 {
        self.heights[z * self.width + x]
    }
}

/// Grass at low elevation grading into bare earth higher up, tinted per
/// triangle so adjacent faces do not read as flat shading.
fn surface_material(elevation: f32) -> Material {
    const GRASS: Color = Color::new(0.0, 1.0, 0.0);
    const EARTH: Color = Color::new(0.859, 0.580, 0.271);

    let base = (1.0 - elevation) * GRASS + elevation * EARTH;
    let tinted = base * rng::random_range(Interval::new(0.7, 1.0));
    Material::reflective(tinted, 1.0, 0.0)
}
