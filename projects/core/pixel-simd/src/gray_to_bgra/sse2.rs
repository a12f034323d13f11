//! 128-bit implementation.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store_interleaved_bgra, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

/// # Safety
///
/// Same contract as [`super::gray_to_bgra`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn gray_to_bgra(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    debug_assert!(width >= LANES);
    if is_aligned(gray, gray_stride, ALIGNMENT) && is_aligned(bgra, bgra_stride, ALIGNMENT) {
        gray_to_bgra_rows::<true>(gray, width, height, gray_stride, bgra, bgra_stride, alpha)
    } else {
        gray_to_bgra_rows::<false>(gray, width, height, gray_stride, bgra, bgra_stride, alpha)
    }
}

#[target_feature(enable = "sse2")]
unsafe fn gray_to_bgra_rows<const ALIGN: bool>(
    mut gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    mut bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let alpha = _mm_set1_epi8(alpha as i8);
    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            let value = load::<ALIGN>(gray.add(col));
            store_interleaved_bgra::<ALIGN>(bgra.add(4 * col), value, value, value, alpha);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            let value = load::<false>(gray.add(anchor));
            store_interleaved_bgra::<false>(bgra.add(4 * anchor), value, value, value, alpha);
        }
        gray = gray.add(gray_stride);
        bgra = bgra.add(bgra_stride);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(W, H)]
    #[case(W + 1, H - 1)]
    #[case(W - 1, H + 1)]
    fn matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_sse2() {
            return;
        }
        let gray = random_view(PixelFormat::Gray8, width, height, 11);
        let mut expected = View::new(PixelFormat::Bgra32, width, height);
        let mut actual = View::new(PixelFormat::Bgra32, width, height);
        unsafe {
            super::super::generic::gray_to_bgra(
                gray.as_ptr(),
                width,
                height,
                gray.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
                0x80,
            );
            super::gray_to_bgra(
                gray.as_ptr(),
                width,
                height,
                gray.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
                0x80,
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::exact(), "sse2 gray_to_bgra");
    }

    #[rstest]
    fn unaligned_rows_match_reference() {
        if !has_sse2() {
            return;
        }
        let gray = random_view_unaligned(PixelFormat::Gray8, W - 1, 17, 12);
        let mut expected = View::new(PixelFormat::Bgra32, W - 1, 17);
        let mut actual = View::with_stride(PixelFormat::Bgra32, W - 1, 17, (W - 1) * 4 + 4);
        unsafe {
            super::super::generic::gray_to_bgra(
                gray.as_ptr(),
                W - 1,
                17,
                gray.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
                0xFF,
            );
            super::gray_to_bgra(
                gray.as_ptr(),
                W - 1,
                17,
                gray.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
                0xFF,
            );
        }
        assert_equivalent(
            &actual,
            &expected,
            &Tolerance::exact(),
            "sse2 gray_to_bgra (unaligned)",
        );
    }
}
