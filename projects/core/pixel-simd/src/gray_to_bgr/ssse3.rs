//! 128-bit implementation; SSSE3 byte shuffles expand 16 gray bytes into 48
//! BGR bytes per op.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

/// # Safety
///
/// Same contract as [`super::gray_to_bgr`], plus `width >= 16`.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn gray_to_bgr(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgr: *mut u8,
    bgr_stride: usize,
) {
    debug_assert!(width >= LANES);
    if is_aligned(gray, gray_stride, ALIGNMENT) && is_aligned(bgr, bgr_stride, ALIGNMENT) {
        gray_to_bgr_rows::<true>(gray, width, height, gray_stride, bgr, bgr_stride)
    } else {
        gray_to_bgr_rows::<false>(gray, width, height, gray_stride, bgr, bgr_stride)
    }
}

#[target_feature(enable = "ssse3")]
unsafe fn gray_to_bgr_rows<const ALIGN: bool>(
    mut gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    mut bgr: *mut u8,
    bgr_stride: usize,
) {
    // Byte i of the 48-byte output replicates gray index i / 3.
    let expand_0 = _mm_setr_epi8(0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5);
    let expand_1 = _mm_setr_epi8(5, 5, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10);
    let expand_2 = _mm_setr_epi8(10, 11, 11, 11, 12, 12, 12, 13, 13, 13, 14, 14, 14, 15, 15, 15);

    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            store_expanded::<ALIGN>(bgr.add(3 * col), load::<ALIGN>(gray.add(col)), expand_0, expand_1, expand_2);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            store_expanded::<false>(bgr.add(3 * anchor), load::<false>(gray.add(anchor)), expand_0, expand_1, expand_2);
        }
        gray = gray.add(gray_stride);
        bgr = bgr.add(bgr_stride);
    }
}

#[inline(always)]
unsafe fn store_expanded<const ALIGN: bool>(
    bgr: *mut u8,
    value: __m128i,
    expand_0: __m128i,
    expand_1: __m128i,
    expand_2: __m128i,
) {
    store::<ALIGN>(bgr, _mm_shuffle_epi8(value, expand_0));
    store::<ALIGN>(bgr.add(16), _mm_shuffle_epi8(value, expand_1));
    store::<ALIGN>(bgr.add(32), _mm_shuffle_epi8(value, expand_2));
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(W, H)]
    #[case(W + 1, H - 1)]
    #[case(W - 1, H + 1)]
    fn matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_ssse3() {
            return;
        }
        let gray = random_view(PixelFormat::Gray8, width, height, 31);
        let mut expected = View::new(PixelFormat::Bgr24, width, height);
        let mut actual = View::new(PixelFormat::Bgr24, width, height);
        unsafe {
            super::super::generic::gray_to_bgr(
                gray.as_ptr(),
                width,
                height,
                gray.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
            );
            super::gray_to_bgr(
                gray.as_ptr(),
                width,
                height,
                gray.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::exact(), "ssse3 gray_to_bgr");
    }

    #[rstest]
    fn unaligned_rows_match_reference() {
        if !has_ssse3() {
            return;
        }
        let gray = random_view_unaligned(PixelFormat::Gray8, 53, 9, 32);
        let mut expected = View::new(PixelFormat::Bgr24, 53, 9);
        let mut actual = View::with_stride(PixelFormat::Bgr24, 53, 9, 53 * 3 + 2);
        unsafe {
            super::super::generic::gray_to_bgr(
                gray.as_ptr(),
                53,
                9,
                gray.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
            );
            super::gray_to_bgr(
                gray.as_ptr(),
                53,
                9,
                gray.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
            );
        }
        assert_equivalent(
            &actual,
            &expected,
            &Tolerance::exact(),
            "ssse3 gray_to_bgr (unaligned)",
        );
    }
}
