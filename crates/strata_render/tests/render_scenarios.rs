//! End-to-end render scenarios exercising the full pipeline from camera to
//! PPM bytes.

use strata_math::{rng, Color, Interval, Point, Vec3};
use strata_render::{
    write_ppm, Bvh, Camera, CameraParameters, Material, Renderer, Sphere, BACKGROUND,
};

fn square_camera(samples: u32, size: u32, vfov: f32, position: Point) -> Camera {
    Camera::new(CameraParameters {
        position,
        look_at: Point::ZERO,
        vup: Vec3::Y,
        focus_distance: 1.0,
        vertical_fov: vfov,
        defocus_angle: 0.0,
        num_samples: samples,
        aspect_ratio: 1.0,
        image_height: size,
    })
}

/// The same encoding the PPM writer applies, for computing expected bytes.
fn encode(c: f32) -> u8 {
    let clamped = Interval::new(0.0, 0.999).clamp(c.abs().powf(1.0 / 2.2));
    (256.0 * clamped) as u8
}

fn parse_p6_header(bytes: &[u8]) -> (u32, u32, usize) {
    let header_end = bytes
        .windows(4)
        .position(|w| w == b"255\n")
        .expect("maxval line present")
        + 4;
    let header = std::str::from_utf8(&bytes[..header_end]).unwrap();
    let mut lines = header.lines();
    assert_eq!(lines.next(), Some("P6"));
    let mut dims = lines.next().unwrap().split_whitespace();
    let width: u32 = dims.next().unwrap().parse().unwrap();
    let height: u32 = dims.next().unwrap().parse().unwrap();
    assert_eq!(lines.next(), Some("255"));
    (width, height, header_end)
}

#[test]
fn empty_scene_renders_uniform_background() {
    let renderer = Renderer::new(square_camera(1, 4, 90.0, Point::new(0.0, 0.0, 5.0)), 1);
    let world = Bvh::new(Vec::new());
    let frame = renderer.render_with(&world, 2);

    for pixel in &frame {
        assert_eq!(*pixel, BACKGROUND);
    }

    let path = std::env::temp_dir().join("strata_empty_scene.ppm");
    write_ppm(&path, 4, 4, &frame).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let (width, height, header_end) = parse_p6_header(&bytes);

    assert_eq!((width, height), (4, 4));
    assert_eq!(bytes.len() - header_end, 4 * 4 * 3);
    let expected = encode(BACKGROUND.x);
    for byte in &bytes[header_end..] {
        assert_eq!(*byte, expected);
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn emissive_sphere_center_hits_corners_miss() {
    // Unit sphere at the origin seen from (0,0,5): angular radius ~0.204.
    // With a 45 degree fov over 5x5 pixels, the center pixel's jittered
    // targets stay well inside the silhouette and the corner pixels' well
    // outside, whatever the sample jitter does.
    rng::seed(99);
    let emitter = Material::light(Color::ONE, 1.0);
    let world = Bvh::new(vec![Sphere::new(Point::ZERO, 1.0, emitter).into()]);

    let renderer = Renderer::new(square_camera(1, 5, 45.0, Point::new(0.0, 0.0, 5.0)), 99);
    let frame = renderer.render_with(&world, 2);

    let center = frame[2 * 5 + 2];
    assert_eq!(center, Color::ONE);

    for corner in [0, 4, 20, 24] {
        assert_eq!(frame[corner], BACKGROUND);
    }
}

#[test]
fn diffuse_sphere_reflects_attenuated_background() {
    // Pinhole camera at the origin, 90 degree fov, 3x3 image, one gray
    // diffuse sphere at (0,0,-1) with radius 0.5. The center pixel always
    // hits the sphere, and a cosine scatter off a convex body cannot re-hit
    // it, so every path is exactly one bounce followed by a background miss:
    // radiance = albedo * background per channel.
    let gray = Material::reflective(Color::splat(0.5), 1.0, 0.0);
    let world = Bvh::new(vec![Sphere::new(Point::new(0.0, 0.0, -1.0), 0.5, gray).into()]);

    let renderer = Renderer::new(square_camera(64, 3, 90.0, Point::ZERO), 42);
    let frame = renderer.render_with(&world, 1);

    let center = frame[1 * 3 + 1];
    let expected = 0.5 * BACKGROUND.x;
    for channel in [center.x, center.y, center.z] {
        assert!(
            (channel - expected).abs() < 1e-4,
            "expected {expected} from one diffuse bounce into the background, got {channel}"
        );
    }
}

#[test]
fn one_pixel_image_renders() {
    // A narrow fov keeps the single jittered pixel on the emitter
    let renderer = Renderer::new(square_camera(2, 1, 10.0, Point::new(0.0, 0.0, 5.0)), 7);
    let world = Bvh::new(vec![Sphere::new(
        Point::ZERO,
        1.0,
        Material::light(Color::ONE, 1.0),
    )
    .into()]);

    let frame = renderer.render_with(&world, 2);
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0], Color::ONE);
}

#[test]
fn zero_samples_render_black_frame() {
    let renderer = Renderer::new(square_camera(0, 3, 90.0, Point::new(0.0, 0.0, 5.0)), 7);
    let world = Bvh::new(vec![Sphere::new(
        Point::ZERO,
        1.0,
        Material::light(Color::ONE, 1.0),
    )
    .into()]);

    let frame = renderer.render_with(&world, 2);
    for pixel in frame {
        assert_eq!(pixel, Color::ZERO);
    }
}

#[test]
fn same_seed_same_assignment_same_bytes() {
    let gray = Material::reflective(Color::splat(0.5), 1.0, 0.0);
    let world = Bvh::new(vec![Sphere::new(Point::new(0.0, 0.0, -1.0), 0.5, gray).into()]);

    let render_once = || {
        let renderer = Renderer::new(square_camera(8, 6, 90.0, Point::ZERO), 1234);
        let frame = renderer.render_with(&world, 1);
        let path = std::env::temp_dir().join(format!(
            "strata_determinism_{}.ppm",
            std::process::id()
        ));
        write_ppm(&path, 6, 6, &frame).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        bytes
    };

    assert_eq!(render_once(), render_once());
}
