//! Binary PPM (P6) serialization of a rendered frame.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use strata_math::{Color, Interval};
use thiserror::Error;

/// Display gamma applied when encoding linear radiance.
const GAMMA: f32 = 2.2;

/// Errors surfaced while writing the output image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to open output file {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write image data to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Gamma-encode one linear channel into a display byte.
fn encode_channel(c: f32) -> u8 {
    let encoded = c.abs().powf(1.0 / GAMMA);
    let clamped = Interval::new(0.0, 0.999).clamp(encoded);
    (256.0 * clamped) as u8
}

/// Write `pixels` (row-major, top-down) as a binary P6 image.
pub fn write_ppm(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[Color],
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let name = path.display().to_string();

    let file = File::create(path).map_err(|source| OutputError::Create {
        path: name.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let mut data = Vec::with_capacity(pixels.len() * 3);
    for pixel in pixels {
        data.push(encode_channel(pixel.x));
        data.push(encode_channel(pixel.y));
        data.push(encode_channel(pixel.z));
    }

    let result: std::io::Result<()> = (|| {
        write!(out, "P6\n{width} {height}\n255\n")?;
        out.write_all(&data)?;
        out.flush()
    })();
    result.map_err(|source| OutputError::Write { path: name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_extremes() {
        assert_eq!(encode_channel(0.0), 0);
        // Full white clamps to 0.999 before scaling
        assert_eq!(encode_channel(1.0), 255);
        // Overbright stays clamped
        assert_eq!(encode_channel(100.0), 255);
    }

    #[test]
    fn test_encode_gamma_curve() {
        // 0.5^(1/2.2) = 0.7297...
        assert_eq!(encode_channel(0.5), (256.0 * 0.5f32.powf(1.0 / 2.2)) as u8);
        // Gamma encoding brightens mid tones
        assert!(encode_channel(0.5) > 128);
    }

    #[test]
    fn test_encode_negative_uses_magnitude() {
        assert_eq!(encode_channel(-0.5), encode_channel(0.5));
    }

    #[test]
    fn test_write_and_parse_header() {
        let path = std::env::temp_dir().join("strata_ppm_header_test.ppm");
        let pixels = vec![Color::new(1.0, 0.0, 0.5); 6];
        write_ppm(&path, 3, 2, &pixels).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n3 2\n255\n";
        assert!(bytes.starts_with(header));
        assert_eq!(bytes.len(), header.len() + 6 * 3);

        // First pixel: full red, black green, encoded blue
        assert_eq!(bytes[header.len()], 255);
        assert_eq!(bytes[header.len() + 1], 0);
        assert_eq!(bytes[header.len() + 2], encode_channel(0.5));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unwritable_path_reports_filename() {
        let error = write_ppm("/nonexistent-dir/image.ppm", 1, 1, &[Color::ZERO]).unwrap_err();
        assert!(error.to_string().contains("/nonexistent-dir/image.ppm"));
    }
}
