// Scalar helpers shared by the color math and the animations.

/// Linear map of `x` within `x0..x1` onto `y0..y1`. Extrapolates outside the range.
#[inline]
pub fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    y0 + (x - x0) * ((y1 - y0) / (x1 - x0))
}

/// Clamp `x` into `lo..=hi`. Unlike `f64::clamp` this never panics on a bad range.
#[inline]
pub fn clamp<T: PartialOrd>(x: T, lo: T, hi: T) -> T {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}
