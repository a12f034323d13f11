//! 128-bit implementation: 48 input bytes become 64 output bytes per op,
//! walked with `palignr` so every shuffle sees 12 source bytes in its low
//! lanes.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

/// # Safety
///
/// Same contract as [`super::bgr_to_bgra`], plus `width >= 16`.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn bgr_to_bgra(
    bgr: *const u8,
    width: usize,
    height: usize,
    bgr_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    debug_assert!(width >= LANES);
    if is_aligned(bgr, bgr_stride, ALIGNMENT) && is_aligned(bgra, bgra_stride, ALIGNMENT) {
        bgr_to_bgra_rows::<true>(bgr, width, height, bgr_stride, bgra, bgra_stride, alpha)
    } else {
        bgr_to_bgra_rows::<false>(bgr, width, height, bgr_stride, bgra, bgra_stride, alpha)
    }
}

#[target_feature(enable = "ssse3")]
unsafe fn bgr_to_bgra_rows<const ALIGN: bool>(
    mut bgr: *const u8,
    width: usize,
    height: usize,
    bgr_stride: usize,
    mut bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    // Spreads 12 BGR bytes over four pixels, leaving the alpha slot zero.
    let spread = _mm_setr_epi8(0, 1, 2, -1, 3, 4, 5, -1, 6, 7, 8, -1, 9, 10, 11, -1);
    let alpha = _mm_set1_epi32((alpha as i32) << 24);

    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            convert_16::<ALIGN>(bgr.add(3 * col), bgra.add(4 * col), spread, alpha);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            convert_16::<false>(bgr.add(3 * anchor), bgra.add(4 * anchor), spread, alpha);
        }
        bgr = bgr.add(bgr_stride);
        bgra = bgra.add(bgra_stride);
    }
}

#[inline(always)]
unsafe fn convert_16<const ALIGN: bool>(
    bgr: *const u8,
    bgra: *mut u8,
    spread: __m128i,
    alpha: __m128i,
) {
    let in_0 = load::<ALIGN>(bgr); // bytes 0..16
    let in_1 = load::<ALIGN>(bgr.add(16)); // bytes 16..32
    let in_2 = load::<ALIGN>(bgr.add(32)); // bytes 32..48

    let px_0 = _mm_shuffle_epi8(in_0, spread);
    let px_1 = _mm_shuffle_epi8(_mm_alignr_epi8(in_1, in_0, 12), spread);
    let px_2 = _mm_shuffle_epi8(_mm_alignr_epi8(in_2, in_1, 8), spread);
    let px_3 = _mm_shuffle_epi8(_mm_srli_si128(in_2, 4), spread);

    store::<ALIGN>(bgra, _mm_or_si128(px_0, alpha));
    store::<ALIGN>(bgra.add(16), _mm_or_si128(px_1, alpha));
    store::<ALIGN>(bgra.add(32), _mm_or_si128(px_2, alpha));
    store::<ALIGN>(bgra.add(48), _mm_or_si128(px_3, alpha));
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
        let bgr = random_view(PixelFormat::Bgr24, width, height, 41);
        let mut expected = View::new(PixelFormat::Bgra32, width, height);
        let mut actual = View::new(PixelFormat::Bgra32, width, height);
        unsafe {
            super::super::generic::bgr_to_bgra(
                bgr.as_ptr(),
                width,
                height,
                bgr.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
                0xFF,
            );
            super::bgr_to_bgra(
                bgr.as_ptr(),
                width,
                height,
                bgr.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
                0xFF,
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::exact(), "ssse3 bgr_to_bgra");
    }

    #[rstest]
    fn unaligned_rows_match_reference() {
        if !has_ssse3() {
            return;
        }
        let bgr = random_view_unaligned(PixelFormat::Bgr24, 47, 5, 42);
        let mut expected = View::new(PixelFormat::Bgra32, 47, 5);
        let mut actual = View::with_stride(PixelFormat::Bgra32, 47, 5, 47 * 4 + 12);
        unsafe {
            super::super::generic::bgr_to_bgra(
                bgr.as_ptr(),
                47,
                5,
                bgr.stride(),
                expected.as_mut_ptr(),
                expected.stride(),
                3,
            );
            super::bgr_to_bgra(
                bgr.as_ptr(),
                47,
                5,
                bgr.stride(),
                actual.as_mut_ptr(),
                actual.stride(),
                3,
            );
        }
        assert_equivalent(
            &actual,
            &expected,
            &Tolerance::exact(),
            "ssse3 bgr_to_bgra (unaligned)",
        );
    }
}
