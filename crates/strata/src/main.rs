//! Scene assembly and render entry point.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use log::info;
use noise::{NoiseFn, OpenSimplex};
use rand::Rng;
use std::time::Instant;
use strata_math::{rng, Color, Point, Vec3};
use strata_render::{
    write_ppm, Bvh, Camera, CameraParameters, Heightmap, Material, Primitive, Renderer, Sphere,
    Triangle,
};

const ASPECT_RATIO: f32 = 16.0 / 9.0;
const IMAGE_HEIGHT: u32 = 1080;

/// Terrain footprint in world units: z extent of the grid.
const COORD_LENGTH: f32 = 20.0;
/// Terrain footprint in world units: x extent of the grid.
const COORD_WIDTH: f32 = 40.0;
/// Noise frequency across the shorter side of the terrain grid.
const NOISE_FREQUENCY: f64 = 6.0;
/// Refraction index of the medium the scene sits in (air).
const WORLD_MEDIUM: f32 = 1.0;
/// Terrain elevation of the water surface; -1 for dry, 1 for submerged.
const SEA_LEVEL: f32 = 0.0;

fn main() -> Result<()> {
    let start = Instant::now();
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    rng::seed(seed);
    println!("Seed: {seed}");

    let camera = Camera::new(CameraParameters {
        position: Point::new(0.0, 1.0, 19.0),
        look_at: Point::ZERO,
        vup: Vec3::Y,
        focus_distance: 2.1,
        vertical_fov: 90.0,
        defocus_angle: 0.0,
        num_samples: args.spp,
        aspect_ratio: ASPECT_RATIO,
        image_height: IMAGE_HEIGHT,
    });

    let world = build_world(seed, args.triangle_length);
    info!("Setup time: {} ms", start.elapsed().as_millis());

    let renderer = Renderer::new(camera, seed);
    let render_start = Instant::now();
    let frame = renderer.render(&world);
    info!("Render time: {} ms", render_start.elapsed().as_millis());

    write_ppm(
        "image.ppm",
        renderer.image_width(),
        renderer.image_height(),
        &frame,
    )?;
    println!("Wrote to image.ppm");
    Ok(())
}

/// The terrain scene: an emissive key light, simplex-noise terrain, and a
/// refractive water plane at sea level.
fn build_world(seed: u64, triangle_length: f32) -> Bvh {
    let mut primitives: Vec<Primitive> = Vec::new();

    let light = Material::light(Color::new(1.0, 0.6, 0.5), 100.0);
    primitives.push(Sphere::new(Point::new(0.0, 1.1, -10.0), 1.5, light).into());

    // Terrain mesh sampled from simplex noise
    let simplex = OpenSimplex::new(seed as u32);
    let length = (COORD_LENGTH / triangle_length) as usize;
    let width = (COORD_WIDTH / triangle_length) as usize;
    let norm = length.min(width) as f64;
    let corner = Point::new(-COORD_LENGTH, 0.0, 0.0);

    let map = Heightmap::new(
        |x, z| {
            simplex.get([
                x * NOISE_FREQUENCY / norm,
                z * NOISE_FREQUENCY / norm,
            ])
        },
        corner,
        triangle_length,
        length,
        width,
    );
    primitives.extend(map.triangulate());

    // Water plane over the low elevations
    let water = Material::refractive(Color::new(0.0, 0.0, 1.0), 0.4, 1.3325 / WORLD_MEDIUM);
    let a = Point::new(-COORD_LENGTH, SEA_LEVEL, corner.z);
    let b = Point::new(COORD_LENGTH, SEA_LEVEL, corner.z);
    let c = Point::new(COORD_LENGTH, SEA_LEVEL, COORD_WIDTH);
    let d = Point::new(-COORD_LENGTH, SEA_LEVEL, COORD_WIDTH);
    primitives.push(Triangle::new(a, b, c, water).into());
    primitives.push(Triangle::new(a, c, d, water).into());

    Bvh::new(primitives)
}
