//! Command-line interface.

use clap::Parser;

/// Renders a procedurally generated terrain scene to `image.ppm`.
#[derive(Debug, Parser)]
#[command(name = "strata", about = "An offline Monte Carlo path tracer")]
pub struct Args {
    /// Seed for terrain generation and sampling; any 64-bit value.
    /// Defaults to platform entropy.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Samples (parent/camera rays) per pixel. Increase for less noise.
    #[arg(short = 'n', long = "spp", default_value_t = 10)]
    pub spp: u32,

    /// Edge length of the squares making up the terrain grid; 0 < t <= 1.
    /// Decrease for more triangles.
    #[arg(
        short = 't',
        long = "tri",
        default_value_t = 0.5,
        value_parser = parse_triangle_length
    )]
    pub triangle_length: f32,
}

fn parse_triangle_length(value: &str) -> Result<f32, String> {
    let length: f32 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if length > 0.0 && length <= 1.0 {
        Ok(length)
    } else {
        Err("triangle length must be greater than 0 and at most 1".into())
    }
}
