//! Portable scalar reference.

use multiversion::multiversion;

/// Scalar [`gray_to_bgr`](super::gray_to_bgr).
///
/// # Safety
///
/// Same contract as [`super::gray_to_bgr`].
#[multiversion(targets(
    // x86-64-v3 without lahfsahf
    "x86_64+avx+avx2+bmi1+bmi2+cmpxchg16b+f16c+fma+fxsr+lzcnt+movbe+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3+xsave",
    // x86-64-v2 without lahfsahf
    "x86_64+cmpxchg16b+fxsr+popcnt+sse+sse2+sse3+sse4.1+sse4.2+ssse3",
))]
pub unsafe fn gray_to_bgr(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgr: *mut u8,
    bgr_stride: usize,
) {
    let mut gray = gray;
    let mut bgr = bgr;
    unsafe {
        for _ in 0..height {
            for col in 0..width {
                let value = *gray.add(col);
                let pixel = bgr.add(3 * col);
                *pixel = value;
                *pixel.add(1) = value;
                *pixel.add(2) = value;
            }
            gray = gray.add(gray_stride);
            bgr = bgr.add(bgr_stride);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn replicates_gray_into_three_channels() {
        let mut gray = View::new(PixelFormat::Gray8, 2, 1);
        gray.row_mut(0).copy_from_slice(&[9, 250]);
        let mut bgr = View::new(PixelFormat::Bgr24, 2, 1);
        unsafe {
            super::gray_to_bgr(gray.as_ptr(), 2, 1, gray.stride(), bgr.as_mut_ptr(), bgr.stride());
        }
        assert_eq!(bgr.row(0), &[9, 9, 9, 250, 250, 250]);
    }
}
