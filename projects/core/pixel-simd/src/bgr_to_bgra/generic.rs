//! Portable scalar reference.

use multiversion::multiversion;

/// Scalar [`bgr_to_bgra`](super::bgr_to_bgra).
///
/// # Safety
///
/// Same contract as [`super::bgr_to_bgra`].
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub unsafe fn bgr_to_bgra(
    bgr: *const u8,
    width: usize,
    height: usize,
    bgr_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let mut bgr = bgr;
    let mut bgra = bgra;
    unsafe {
        for _ in 0..height {
            for col in 0..width {
                let src = bgr.add(3 * col);
                let dst = bgra.add(4 * col);
                *dst = *src;
                *dst.add(1) = *src.add(1);
                *dst.add(2) = *src.add(2);
                *dst.add(3) = alpha;
            }
            bgr = bgr.add(bgr_stride);
            bgra = bgra.add(bgra_stride);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn copies_channels_and_fixes_alpha() {
        let mut bgr = View::new(PixelFormat::Bgr24, 2, 1);
        bgr.row_mut(0).copy_from_slice(&[10, 20, 30, 40, 50, 60]);
        let mut bgra = View::new(PixelFormat::Bgra32, 2, 1);
        unsafe {
            super::bgr_to_bgra(bgr.as_ptr(), 2, 1, bgr.stride(), bgra.as_mut_ptr(), bgra.stride(), 7);
        }
        assert_eq!(bgra.row(0), &[10, 20, 30, 7, 40, 50, 60, 7]);
    }
}
