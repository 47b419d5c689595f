//! Seeded uniform sampling helpers over [`rand::RngCore`].
//!
//! Every random decision in a render pass goes through these helpers so a
//! single seeded generator fully determines the output frame.
use rand::RngCore;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits so the result is exactly representable and never rounds up to 1.0.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Generate a random float in the range [min, max).
#[inline]
pub fn range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + rand01(rng) * (max - min)
}

/// Pick a uniformly distributed index in `0..len`. Returns `None` for an empty range.
pub fn pick_index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (rand01(rng) * len as f32) as usize;
    Some(idx.min(len - 1))
}

/// Pick a reference to a uniformly chosen element.
pub fn pick<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    pick_index(rng, items.len()).map(|i| &items[i])
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut dyn RngCore, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        if let Some(j) = pick_index(rng, i + 1) {
            items.swap(i, j);
        }
    }
}
