//! Background starfield points.
//!
//! Each coordinate is the mean of two uniform draws on `[0, extent]`, which
//! bunches the cloud toward its centre.

use crate::core::rng::DeterministicRng;

/// Generate `count` points.
pub fn generate_starfield(rng: &mut DeterministicRng, count: u32, extent: f32) -> Vec<[f32; 3]> {
    let mut coord = || (rng.next_f32() * extent + rng.next_f32() * extent) / 2.0;

    (0..count)
        .map(|_| {
            let x = coord();
            let y = coord();
            let z = coord();
            [x, y, z]
        })
        .collect()
}
