/// Splitmix64 step. Deterministic input generator for property-style tests.
pub(crate) fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Coordinate in `[-span, span)` on each axis, advancing `state`.
pub(crate) fn random_coordinate<const N: usize>(state: &mut u64, span: f32) -> [f32; N] {
    std::array::from_fn(|_| {
        *state = splitmix64(*state);
        let unit = (*state >> 40) as f32 / (1u64 << 24) as f32;
        (unit * 2.0 - 1.0) * span
    })
}
