//! Shared helpers for unit tests.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// `len` random pixels from a fixed seed, with any alpha value.
pub(crate) fn test_pixels_rgba(len: usize) -> Vec<u32> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
    (0..len).map(|_| rng.gen::<u32>()).collect()
}

/// `len` random fully opaque pixels from a fixed seed.
pub(crate) fn test_pixels_opaque(len: usize) -> Vec<u32> {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(1);
    (0..len).map(|_| rng.gen::<u32>() | 0xFF00_0000).collect()
}
