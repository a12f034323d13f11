//! 128-bit implementations.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store, tail_mask, ALIGNMENT, LANES};
use core::ptr::write_bytes;
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

#[inline(always)]
unsafe fn boosted_gradient_16(
    a: __m128i,
    b: __m128i,
    saturation8: __m128i,
    saturation16: __m128i,
    boost16: __m128i,
) -> __m128i {
    let positive = _mm_min_epu8(_mm_subs_epu8(b, a), saturation8);
    let negative = _mm_min_epu8(_mm_subs_epu8(a, b), saturation8);
    let zero = _mm_setzero_si128();
    let lo = _mm_mullo_epi16(
        _mm_sub_epi16(
            _mm_add_epi16(saturation16, _mm_unpacklo_epi8(positive, zero)),
            _mm_unpacklo_epi8(negative, zero),
        ),
        boost16,
    );
    let hi = _mm_mullo_epi16(
        _mm_sub_epi16(
            _mm_add_epi16(saturation16, _mm_unpackhi_epi8(positive, zero)),
            _mm_unpackhi_epi8(negative, zero),
        ),
        boost16,
    );
    _mm_packus_epi16(lo, hi)
}

/// The `±1` column offsets make every access unaligned, so this kernel has no
/// aligned specialization.
///
/// # Safety
///
/// Same contract as [`super::texture_boosted_saturated_gradient`], plus
/// `width >= 18`.
#[target_feature(enable = "sse2")]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn texture_boosted_saturated_gradient(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    saturation: u8,
    boost: u8,
    dx: *mut u8,
    dx_stride: usize,
    dy: *mut u8,
    dy_stride: usize,
) {
    debug_assert!(width >= LANES + 2);
    let saturation8 = _mm_set1_epi8(saturation as i8);
    let saturation16 = _mm_set1_epi16(saturation as i16);
    let boost16 = _mm_set1_epi16(boost as i16);

    // Interior columns [1, width - 1), blocked with the tail anchored so the
    // final op ends exactly at the last interior column.
    let interior_end = width - 1;
    for row in 0..height {
        let dx_row = dx.add(row * dx_stride);
        let dy_row = dy.add(row * dy_stride);
        if row == 0 || row == height - 1 {
            write_bytes(dx_row, 0, width);
            write_bytes(dy_row, 0, width);
            continue;
        }
        let src_row = src.add(row * src_stride);
        let mut col = 1;
        while col + LANES <= interior_end {
            gradient_block(src_row, src_stride, col, saturation8, saturation16, boost16, dx_row, dy_row);
            col += LANES;
        }
        if col < interior_end {
            let anchor = interior_end - LANES;
            gradient_block(src_row, src_stride, anchor, saturation8, saturation16, boost16, dx_row, dy_row);
        }
        *dx_row = 0;
        *dy_row = 0;
        *dx_row.add(width - 1) = 0;
        *dy_row.add(width - 1) = 0;
    }
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
unsafe fn gradient_block(
    src_row: *const u8,
    src_stride: usize,
    col: usize,
    saturation8: __m128i,
    saturation16: __m128i,
    boost16: __m128i,
    dx_row: *mut u8,
    dy_row: *mut u8,
) {
    let left = load::<false>(src_row.add(col - 1));
    let right = load::<false>(src_row.add(col + 1));
    let above = load::<false>(src_row.sub(src_stride).add(col));
    let below = load::<false>(src_row.add(src_stride).add(col));
    store::<false>(
        dx_row.add(col),
        boosted_gradient_16(left, right, saturation8, saturation16, boost16),
    );
    store::<false>(
        dy_row.add(col),
        boosted_gradient_16(above, below, saturation8, saturation16, boost16),
    );
}

/// # Safety
///
/// Same contract as [`super::texture_boosted_uv`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn texture_boosted_uv(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    boost: u8,
    dst: *mut u8,
    dst_stride: usize,
) {
    debug_assert!(width >= LANES);
    if is_aligned(src, src_stride, ALIGNMENT) && is_aligned(dst, dst_stride, ALIGNMENT) {
        texture_boosted_uv_rows::<true>(src, src_stride, width, height, boost, dst, dst_stride)
    } else {
        texture_boosted_uv_rows::<false>(src, src_stride, width, height, boost, dst, dst_stride)
    }
}

#[target_feature(enable = "sse2")]
unsafe fn texture_boosted_uv_rows<const ALIGN: bool>(
    mut src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    boost: u8,
    mut dst: *mut u8,
    dst_stride: usize,
) {
    let min = 128 - 128 / boost as i32;
    let max = 255 - min;
    let min8 = _mm_set1_epi8(min as u8 as i8);
    let max8 = _mm_set1_epi8(max as u8 as i8);
    let boost16 = _mm_set1_epi16(boost as i16);

    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            let boosted = boost_16(load::<ALIGN>(src.add(col)), min8, max8, boost16);
            store::<ALIGN>(dst.add(col), boosted);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            let boosted = boost_16(load::<false>(src.add(anchor)), min8, max8, boost16);
            store::<false>(dst.add(anchor), boosted);
        }
        src = src.add(src_stride);
        dst = dst.add(dst_stride);
    }
}

#[inline(always)]
unsafe fn boost_16(value: __m128i, min8: __m128i, max8: __m128i, boost16: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let windowed = _mm_subs_epu8(_mm_min_epu8(_mm_max_epu8(value, min8), max8), min8);
    _mm_packus_epi16(
        _mm_mullo_epi16(_mm_unpacklo_epi8(windowed, zero), boost16),
        _mm_mullo_epi16(_mm_unpackhi_epi8(windowed, zero), boost16),
    )
}

/// # Safety
///
/// Same contract as [`super::texture_get_difference_sum`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn texture_get_difference_sum(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    lo: *const u8,
    lo_stride: usize,
    hi: *const u8,
    hi_stride: usize,
) -> i64 {
    debug_assert!(width >= LANES);
    let aligned = is_aligned(src, src_stride, ALIGNMENT)
        && is_aligned(lo, lo_stride, ALIGNMENT)
        && is_aligned(hi, hi_stride, ALIGNMENT);
    if aligned {
        texture_get_difference_sum_rows::<true>(src, src_stride, width, height, lo, lo_stride, hi, hi_stride)
    } else {
        texture_get_difference_sum_rows::<false>(src, src_stride, width, height, lo, lo_stride, hi, hi_stride)
    }
}

#[target_feature(enable = "sse2")]
#[allow(clippy::too_many_arguments)]
unsafe fn texture_get_difference_sum_rows<const ALIGN: bool>(
    mut src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    mut lo: *const u8,
    lo_stride: usize,
    mut hi: *const u8,
    hi_stride: usize,
) -> i64 {
    let full = _mm_set1_epi8(-1);
    let plan = RowPlan::new(width, LANES);
    // Two u64 partial sums per accumulator, combined at the end.
    let mut positive = _mm_setzero_si128();
    let mut negative = _mm_setzero_si128();
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            accumulate_16(
                load::<ALIGN>(src.add(col)),
                load::<ALIGN>(lo.add(col)),
                load::<ALIGN>(hi.add(col)),
                full,
                &mut positive,
                &mut negative,
            );
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            // Masking the inputs keeps overlap columns out of the sums.
            accumulate_16(
                load::<false>(src.add(anchor)),
                load::<false>(lo.add(anchor)),
                load::<false>(hi.add(anchor)),
                tail_mask(plan.tail_len),
                &mut positive,
                &mut negative,
            );
        }
        src = src.add(src_stride);
        lo = lo.add(lo_stride);
        hi = hi.add(hi_stride);
    }

    let mut positive_parts = [0u64; 2];
    let mut negative_parts = [0u64; 2];
    _mm_storeu_si128(positive_parts.as_mut_ptr() as *mut __m128i, positive);
    _mm_storeu_si128(negative_parts.as_mut_ptr() as *mut __m128i, negative);
    (positive_parts[0] + positive_parts[1]) as i64 - (negative_parts[0] + negative_parts[1]) as i64
}

#[inline(always)]
unsafe fn accumulate_16(
    current: __m128i,
    lo: __m128i,
    hi: __m128i,
    mask: __m128i,
    positive: &mut __m128i,
    negative: &mut __m128i,
) {
    let zero = _mm_setzero_si128();
    let current = _mm_and_si128(mask, current);
    let average = _mm_and_si128(mask, _mm_avg_epu8(lo, hi));
    *positive = _mm_add_epi64(*positive, _mm_sad_epu8(_mm_subs_epu8(current, average), zero));
    *negative = _mm_add_epi64(*negative, _mm_sad_epu8(_mm_subs_epu8(average, current), zero));
}

/// # Safety
///
/// Same contract as [`super::texture_perform_compensation`], plus
/// `width >= 16` and `shift != 0`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn texture_perform_compensation(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    shift: i32,
    dst: *mut u8,
    dst_stride: usize,
) {
    debug_assert!(width >= LANES);
    debug_assert!(shift != 0);
    if is_aligned(src, src_stride, ALIGNMENT) && is_aligned(dst, dst_stride, ALIGNMENT) {
        texture_perform_compensation_rows::<true>(src, src_stride, width, height, shift, dst, dst_stride)
    } else {
        texture_perform_compensation_rows::<false>(src, src_stride, width, height, shift, dst, dst_stride)
    }
}

#[target_feature(enable = "sse2")]
unsafe fn texture_perform_compensation_rows<const ALIGN: bool>(
    mut src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    shift: i32,
    mut dst: *mut u8,
    dst_stride: usize,
) {
    let magnitude = _mm_set1_epi8(shift.unsigned_abs().min(255) as u8 as i8);
    let add = shift > 0;
    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            let value = load::<ALIGN>(src.add(col));
            let shifted = if add {
                _mm_adds_epu8(value, magnitude)
            } else {
                _mm_subs_epu8(value, magnitude)
            };
            store::<ALIGN>(dst.add(col), shifted);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            let value = load::<false>(src.add(anchor));
            let shifted = if add {
                _mm_adds_epu8(value, magnitude)
            } else {
                _mm_subs_epu8(value, magnitude)
            };
            store::<false>(dst.add(anchor), shifted);
        }
        src = src.add(src_stride);
        dst = dst.add(dst_stride);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(W, H, 32, 3)]
    #[case(W + 1, H - 1, 16, 4)]
    #[case(W - 1, H + 1, 16, 5)]
    fn gradient_matches_reference(
        #[case] width: usize,
        #[case] height: usize,
        #[case] saturation: u8,
        #[case] boost: u8,
    ) {
        if !has_sse2() {
            return;
        }
        let src = random_view(PixelFormat::Gray8, width, height, 101);
        let mut dx_expected = View::new(PixelFormat::Gray8, width, height);
        let mut dy_expected = View::new(PixelFormat::Gray8, width, height);
        let mut dx_actual = View::new(PixelFormat::Gray8, width, height);
        let mut dy_actual = View::new(PixelFormat::Gray8, width, height);
        unsafe {
            super::super::generic::texture_boosted_saturated_gradient(
                src.as_ptr(), src.stride(), width, height, saturation, boost,
                dx_expected.as_mut_ptr(), dx_expected.stride(),
                dy_expected.as_mut_ptr(), dy_expected.stride(),
            );
            super::texture_boosted_saturated_gradient(
                src.as_ptr(), src.stride(), width, height, saturation, boost,
                dx_actual.as_mut_ptr(), dx_actual.stride(),
                dy_actual.as_mut_ptr(), dy_actual.stride(),
            );
        }
        assert_equivalent(&dx_actual, &dx_expected, &Tolerance::exact(), "sse2 gradient dx");
        assert_equivalent(&dy_actual, &dy_expected, &Tolerance::exact(), "sse2 gradient dy");
    }

    #[rstest]
    #[case(W, H, 3)]
    #[case(W + 1, H - 1, 4)]
    #[case(W - 1, H + 1, 5)]
    fn boosted_uv_matches_reference(#[case] width: usize, #[case] height: usize, #[case] boost: u8) {
        if !has_sse2() {
            return;
        }
        let src = random_view(PixelFormat::Gray8, width, height, 102);
        let mut expected = View::new(PixelFormat::Gray8, width, height);
        let mut actual = View::new(PixelFormat::Gray8, width, height);
        unsafe {
            super::super::generic::texture_boosted_uv(
                src.as_ptr(), src.stride(), width, height, boost,
                expected.as_mut_ptr(), expected.stride(),
            );
            super::texture_boosted_uv(
                src.as_ptr(), src.stride(), width, height, boost,
                actual.as_mut_ptr(), actual.stride(),
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::exact(), "sse2 texture_boosted_uv");
    }

    #[rstest]
    #[case(W, H)]
    #[case(W + 3, H - 3)]
    #[case(W - 3, H + 3)]
    fn difference_sum_matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_sse2() {
            return;
        }
        let src = random_view(PixelFormat::Gray8, width, height, 103);
        let lo = random_view(PixelFormat::Gray8, width, height, 104);
        let hi = random_view(PixelFormat::Gray8, width, height, 105);
        let (expected, actual) = unsafe {
            (
                super::super::generic::texture_get_difference_sum(
                    src.as_ptr(), src.stride(), width, height,
                    lo.as_ptr(), lo.stride(), hi.as_ptr(), hi.stride(),
                ),
                super::texture_get_difference_sum(
                    src.as_ptr(), src.stride(), width, height,
                    lo.as_ptr(), lo.stride(), hi.as_ptr(), hi.stride(),
                ),
            )
        };
        if let Err(mismatch) = pixel_simd_testing::compare_value(expected, actual) {
            panic!("sse2 texture_get_difference_sum diverged: {mismatch}");
        }
    }

    #[rstest]
    #[case(17)]
    #[case(3)]
    #[case(-4)]
    #[case(-33)]
    #[case(255)]
    fn compensation_matches_reference(#[case] shift: i32) {
        if !has_sse2() {
            return;
        }
        let width = W + 1;
        let height = 9;
        let src = random_view(PixelFormat::Gray8, width, height, 106);
        let mut expected = View::new(PixelFormat::Gray8, width, height);
        let mut actual = View::new(PixelFormat::Gray8, width, height);
        unsafe {
            super::super::generic::texture_perform_compensation(
                src.as_ptr(), src.stride(), width, height, shift,
                expected.as_mut_ptr(), expected.stride(),
            );
            super::texture_perform_compensation(
                src.as_ptr(), src.stride(), width, height, shift,
                actual.as_mut_ptr(), actual.stride(),
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::exact(), "sse2 compensation");
    }
}
