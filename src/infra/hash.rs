use std::hash::Hasher;

use twox_hash::XxHash64;

const HIGH_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

pub fn hash64(text: &str) -> u64 {
    hash64_with_seed(text, 0)
}

/// 128-bit digest built from two independently seeded xxHash64 passes.
pub fn hash128(text: &str) -> u128 {
    let high = hash64_with_seed(text, HIGH_SEED) as u128;
    let low = hash64(text) as u128;
    (high << 64) | low
}

fn hash64_with_seed(text: &str, seed: u64) -> u64 {
    let mut hasher = XxHash64::with_seed(seed);
    hasher.write(text.as_bytes());
    hasher.finish()
}
