/// Map `index` in `[0, domain)` onto `[0, len)` by proportional scaling with truncation.
///
/// Returns `None` when `len == 0`. A zero `domain` maps everything to `0`.
pub(crate) fn resample_index(index: u32, domain: u32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if domain == 0 {
        return Some(0);
    }
    let ratio = len as f64 / f64::from(domain);
    let scaled = (f64::from(index) * ratio) as usize;
    Some(scaled.min(len - 1))
}

/// `n / d` with the divisor floored at 1.
pub(crate) fn div_floor_one(n: usize, d: usize) -> usize {
    n / d.max(1)
}

/// SplitMix64 finalizer.
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive an independent RNG seed for one animation frame.
pub(crate) fn frame_seed(seed: u64, frame: usize) -> u64 {
    mix64(seed ^ (frame as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
