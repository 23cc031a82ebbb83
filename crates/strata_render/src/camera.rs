//! Camera: viewport geometry and primary-ray generation.

use strata_math::{rng, Point, Ray, UnitVec3, Vec3};

/// Everything needed to place and configure a camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraParameters {
    pub position: Point,
    pub look_at: Point,
    pub vup: Vec3,
    pub focus_distance: f32,
    /// Vertical field of view in degrees.
    pub vertical_fov: f32,
    /// Aperture cone angle in degrees; 0 or less means a pinhole camera.
    pub defocus_angle: f32,
    pub num_samples: u32,
    pub aspect_ratio: f32,
    pub image_height: u32,
}

/// Viewport frame precomputed from [`CameraParameters`]; immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point,
    image_width: u32,
    image_height: u32,
    num_samples: u32,
    defocus_angle: f32,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    pixel_0_center: Point,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new(params: CameraParameters) -> Self {
        let image_height = params.image_height.max(1);
        let image_width = ((image_height as f32 * params.aspect_ratio) as u32).max(1);

        // Orthonormal frame: w opposite the view direction, u right, v up
        let w = UnitVec3::new(params.position - params.look_at);
        let u = UnitVec3::new(params.vup.cross(w.get()));
        let v = UnitVec3::new(w.cross(u.get()));

        let viewport_height = 2.0 * (params.vertical_fov.to_radians() / 2.0).tan();
        let viewport_width = viewport_height * params.aspect_ratio;

        let viewport_u = params.focus_distance * viewport_width * u;
        let viewport_v = params.focus_distance * viewport_height * -v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let upper_left = params.position
            - params.focus_distance * w
            - viewport_u / 2.0
            - viewport_v / 2.0;
        let pixel_0_center = upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius =
            params.focus_distance * (params.defocus_angle.to_radians() / 2.0).tan();
        let defocus_disk_u = defocus_radius * u;
        let defocus_disk_v = defocus_radius * v;

        Self {
            position: params.position,
            image_width,
            image_height,
            num_samples: params.num_samples,
            defocus_angle: params.defocus_angle,
            pixel_delta_u,
            pixel_delta_v,
            pixel_0_center,
            defocus_disk_u,
            defocus_disk_v,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Primary ray through pixel (x, y), jittered inside the pixel and,
    /// for a positive defocus angle, across the aperture disk.
    pub fn generate_ray(&self, x: u32, y: u32) -> Ray {
        let dx = rng::random_float() - 0.5;
        let dy = rng::random_float() - 0.5;
        let target = self.pixel_0_center
            + (x as f32 + dx) * self.pixel_delta_u
            + (y as f32 + dy) * self.pixel_delta_v;

        let origin = if self.defocus_angle <= 0.0 {
            self.position
        } else {
            let p = rng::random_in_unit_disk();
            self.position + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
        };

        Ray::new(origin, UnitVec3::new(target - origin))
    }
}
