//! Seeded thread-local random number generation.
//!
//! Every thread owns a ChaCha stream. The main thread is seeded once at
//! startup from the run seed; render workers derive their own streams with
//! [`worker_stream`] so a run is reproducible for a fixed seed and work
//! assignment.

use crate::Interval;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::from_rng(&mut rand::rng()));
}

/// Reseed the calling thread's generator.
pub fn seed(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = ChaCha8Rng::seed_from_u64(seed));
}

/// Seed for worker `index`'s stream, derived from the run seed.
///
/// splitmix64 keeps neighboring worker indices from producing correlated
/// ChaCha streams.
pub fn worker_stream(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ index.wrapping_add(1))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Uniform f32 in [0, 1).
pub fn random_float() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Uniform f32 in [range.min, range.max).
pub fn random_range(range: Interval) -> f32 {
    range.min + range.size() * random_float()
}

/// Rejection-sample a point inside the unit disk (z = 0).
pub fn random_in_unit_disk() -> Vec3 {
    loop {
        let p = Vec3::new(
            random_range(Interval::new(-1.0, 1.0)),
            random_range(Interval::new(-1.0, 1.0)),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
