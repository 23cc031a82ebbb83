//! strata_render - CPU Monte Carlo path tracing core.
//!
//! Owns the renderable vocabulary (spheres, triangles, materials, hit
//! records), the BVH acceleration structure, the camera, the parallel
//! pixel-sampling engine, and the binary PPM writer.

mod bvh;
mod camera;
mod heightmap;
mod material;
mod ppm;
mod primitive;
mod renderer;
mod sphere;
mod triangle;

pub use bvh::Bvh;
pub use camera::{Camera, CameraParameters};
pub use heightmap::Heightmap;
pub use material::{Bounce, Material};
pub use ppm::{write_ppm, OutputError};
pub use primitive::{HitRecord, Primitive};
pub use renderer::{Renderer, BACKGROUND, PIXELS_PER_TILE, RAY_DEPTH};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the shared geometric vocabulary from strata_math.
pub use strata_math::{Aabb, Color, Interval, Point, Ray, UnitVec3, Vec3};
