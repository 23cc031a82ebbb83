//! Parallel pixel-sampling engine.
//!
//! Pixels are handed out to worker threads in contiguous 32-pixel chunks
//! through one shared atomic counter; a reporter thread tracks a second
//! counter for the progress bar. Every worker owns its RNG stream, so a run
//! is reproducible for a fixed seed, worker count, and chunk assignment.

use crate::bvh::Bvh;
use crate::camera::Camera;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use strata_math::{rng, Color, Interval, Ray};

/// Maximum path length in bounces.
pub const RAY_DEPTH: u32 = 16;

/// Pixels handed to a worker per scheduling step.
pub const PIXELS_PER_TILE: usize = 32;

/// Radiance for rays that leave the scene.
pub const BACKGROUND: Color = Color::new(0.01, 0.01, 0.01);

/// How often the reporter thread refreshes the progress bar.
const PROGRESS_POLL: Duration = Duration::from_millis(100);

/// Drives ray generation over the image plane and accumulates pixel colors.
pub struct Renderer {
    camera: Camera,
    seed: u64,
}

impl Renderer {
    pub fn new(camera: Camera, seed: u64) -> Self {
        Self { camera, seed }
    }

    pub fn image_width(&self) -> u32 {
        self.camera.image_width()
    }

    pub fn image_height(&self) -> u32 {
        self.camera.image_height()
    }

    /// Render the world into a linear-color frame, row-major top-down,
    /// using all but one of the available cores.
    pub fn render(&self, world: &Bvh) -> Vec<Color> {
        let cores = thread::available_parallelism().map_or(1, |n| n.get());
        self.render_with(world, cores.saturating_sub(1).max(1))
    }

    /// Render with an explicit worker count; one worker makes the chunk
    /// assignment, and therefore the output bytes, deterministic.
    pub fn render_with(&self, world: &Bvh, workers: usize) -> Vec<Color> {
        let workers = workers.max(1);
        let width = self.camera.image_width() as usize;
        let total = width * self.camera.image_height() as usize;

        log::info!(
            "rendering {}x{} at {} spp on {} worker threads",
            width,
            self.camera.image_height(),
            self.camera.num_samples(),
            workers
        );

        let frame = Mutex::new(vec![Color::ZERO; total]);
        let next = AtomicUsize::new(0);
        let done = AtomicUsize::new(0);

        thread::scope(|scope| {
            let frame = &frame;
            let next = &next;
            let done = &done;

            for index in 0..workers {
                scope.spawn(move || {
                    rng::seed(rng::worker_stream(self.seed, index as u64));

                    loop {
                        let start = next.fetch_add(PIXELS_PER_TILE, Ordering::Relaxed);
                        if start >= total {
                            break;
                        }
                        let end = (start + PIXELS_PER_TILE).min(total);

                        let mut tile = Vec::with_capacity(end - start);
                        for i in start..end {
                            let x = (i % width) as u32;
                            let y = (i / width) as u32;
                            tile.push(self.pixel_color(x, y, world));
                        }

                        // Chunks are disjoint, so the lock is only held for
                        // the splice itself.
                        frame.lock().unwrap()[start..end].copy_from_slice(&tile);
                        done.fetch_add(end - start, Ordering::Relaxed);
                    }
                });
            }

            // Progress reporter; exits once every pixel is accounted for.
            scope.spawn(move || {
                let bar = ProgressBar::new(total as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{bar:40} {pos}/{len} ETA: {eta}")
                        .unwrap(),
                );
                loop {
                    let finished = done.load(Ordering::Relaxed);
                    bar.set_position(finished as u64);
                    if finished >= total {
                        break;
                    }
                    thread::sleep(PROGRESS_POLL);
                }
                bar.finish();
            });
        });

        frame.into_inner().unwrap()
    }

    /// Average `num_samples` independent path samples through pixel (x, y).
    pub fn pixel_color(&self, x: u32, y: u32, world: &Bvh) -> Color {
        let samples = self.camera.num_samples();
        if samples == 0 {
            return Color::ZERO;
        }

        let mut sum = Color::ZERO;
        for _ in 0..samples {
            sum += Self::ray_color(&self.camera.generate_ray(x, y), RAY_DEPTH, world);
        }
        sum / samples as f32
    }

    /// Radiance arriving along `ray`, following at most `depth` bounces.
    fn ray_color(ray: &Ray, depth: u32, world: &Bvh) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        // Start slightly past the origin so a bounced ray cannot re-hit the
        // surface it just left.
        let Some(record) = world.hit(ray, Interval::new(0.001, f32::INFINITY)) else {
            return BACKGROUND;
        };

        let emitted = record.material.emitted();
        match record.material.bounce(ray, &record) {
            Some(bounce) => {
                bounce.attenuation * Self::ray_color(&bounce.next, depth - 1, world) + emitted
            }
            None => emitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraParameters;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use strata_math::{Point, UnitVec3, Vec3};

    fn camera(samples: u32, size: u32) -> Camera {
        Camera::new(CameraParameters {
            position: Point::new(0.0, 0.0, 5.0),
            look_at: Point::ZERO,
            vup: Vec3::Y,
            focus_distance: 1.0,
            vertical_fov: 45.0,
            defocus_angle: 0.0,
            num_samples: samples,
            aspect_ratio: 1.0,
            image_height: size,
        })
    }

    #[test]
    fn test_miss_returns_background() {
        let world = Bvh::new(Vec::new());
        let ray = Ray::new(Point::ZERO, UnitVec3::new(-Vec3::Z));
        assert_eq!(Renderer::ray_color(&ray, RAY_DEPTH, &world), BACKGROUND);
    }

    #[test]
    fn test_zero_depth_returns_black() {
        let world = Bvh::new(vec![Sphere::new(
            Point::new(0.0, 0.0, -2.0),
            1.0,
            Material::light(Color::ONE, 1.0),
        )
        .into()]);
        let ray = Ray::new(Point::ZERO, UnitVec3::new(-Vec3::Z));
        assert_eq!(Renderer::ray_color(&ray, 0, &world), Color::ZERO);
    }

    #[test]
    fn test_emitter_radiance() {
        let world = Bvh::new(vec![Sphere::new(
            Point::new(0.0, 0.0, -2.0),
            1.0,
            Material::light(Color::new(1.0, 0.5, 0.25), 2.0),
        )
        .into()]);
        let ray = Ray::new(Point::ZERO, UnitVec3::new(-Vec3::Z));
        assert_eq!(
            Renderer::ray_color(&ray, RAY_DEPTH, &world),
            Color::new(2.0, 1.0, 0.5)
        );
    }

    #[test]
    fn test_zero_samples_is_black() {
        rng::seed(31);
        let renderer = Renderer::new(camera(0, 4), 31);
        let world = Bvh::new(Vec::new());
        assert_eq!(renderer.pixel_color(2, 2, &world), Color::ZERO);
    }

    #[test]
    fn test_render_fills_every_pixel() {
        let renderer = Renderer::new(camera(1, 8), 77);
        let world = Bvh::new(Vec::new());
        let frame = renderer.render_with(&world, 3);

        assert_eq!(frame.len(), 64);
        for pixel in frame {
            assert_eq!(pixel, BACKGROUND);
        }
    }

    #[test]
    fn test_single_worker_is_deterministic() {
        let world = Bvh::new(vec![Sphere::new(
            Point::ZERO,
            1.0,
            Material::reflective(Color::splat(0.5), 1.0, 0.0),
        )
        .into()]);

        let renderer = Renderer::new(camera(4, 8), 42);
        let first = renderer.render_with(&world, 1);
        let second = renderer.render_with(&world, 1);
        assert_eq!(first, second);
    }
}
