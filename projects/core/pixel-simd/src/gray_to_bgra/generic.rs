//! Portable scalar reference; the oracle every vector variant is tested
//! against and the guaranteed dispatch fallback.

use multiversion::multiversion;

/// Scalar [`gray_to_bgra`](super::gray_to_bgra): one pixel at a time, correct
/// for every width and height including zero.
///
/// # Safety
///
/// Same contract as [`super::gray_to_bgra`].
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub unsafe fn gray_to_bgra(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let mut gray = gray;
    let mut bgra = bgra;
    unsafe {
        for _ in 0..height {
            for col in 0..width {
                let value = *gray.add(col);
                let pixel = bgra.add(4 * col);
                *pixel = value;
                *pixel.add(1) = value;
                *pixel.add(2) = value;
                *pixel.add(3) = alpha;
            }
            gray = gray.add(gray_stride);
            bgra = bgra.add(bgra_stride);
        }
    }
}
