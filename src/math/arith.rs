/// Integer division rounded toward negative infinity.
///
/// Only the numerator can go negative in the shape formulas (a kernel wider
/// than the padded input), and the divisor is always a stride ≥ 1, so
/// Euclidean division gives the floor: `floor_div(-3, 2) == -2`, not `-1`.
pub fn floor_div(numerator: i64, divisor: i64) -> i64 {
    debug_assert!(divisor > 0, "divisor must be positive");
    numerator.div_euclid(divisor)
}

/// Kernel extent once dilation is applied: `d·(k−1)+1`, saturating at
/// `i64::MAX` for kernel and dilation near `u32::MAX`.
pub fn effective_kernel(kernel: u32, dilation: u32) -> i64 {
    i64::from(dilation)
        .saturating_mul(i64::from(kernel) - 1)
        .saturating_add(1)
}
