//! 256-bit implementation.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::avx2::{load, store, tail_mask, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

#[inline(always)]
unsafe fn feature_difference(value: __m256i, lo: __m256i, hi: __m256i) -> __m256i {
    _mm256_max_epu8(_mm256_subs_epu8(value, hi), _mm256_subs_epu8(lo, value))
}

#[inline(always)]
unsafe fn shifted_weighted_square_16(difference: __m256i, weight: __m256i) -> __m256i {
    _mm256_mulhi_epu16(_mm256_mullo_epi16(difference, difference), weight)
}

#[inline(always)]
unsafe fn shifted_weighted_square_8(difference: __m256i, weight: __m256i) -> __m256i {
    let zero = _mm256_setzero_si256();
    let lo = shifted_weighted_square_16(_mm256_unpacklo_epi8(difference, zero), weight);
    let hi = shifted_weighted_square_16(_mm256_unpackhi_epi8(difference, zero), weight);
    _mm256_packus_epi16(lo, hi)
}

/// One 32-column update; `mask` zeroes the increment in overlap columns of
/// the tail op.
#[inline(always)]
unsafe fn update_32<const ALIGN: bool>(
    value: *const u8,
    lo: *const u8,
    hi: *const u8,
    difference: *mut u8,
    offset: usize,
    weight: __m256i,
    mask: __m256i,
) {
    let value = load::<ALIGN>(value.add(offset));
    let lo = load::<ALIGN>(lo.add(offset));
    let hi = load::<ALIGN>(hi.add(offset));
    let current = load::<ALIGN>(difference.add(offset));

    let excess = feature_difference(value, lo, hi);
    let increment = _mm256_and_si256(mask, shifted_weighted_square_8(excess, weight));
    store::<ALIGN>(difference.add(offset), _mm256_adds_epu8(current, increment));
}

/// # Safety
///
/// Same contract as [`super::add_feature_difference`], plus `width >= 32`.
#[target_feature(enable = "avx2")]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn add_feature_difference(
    value: *const u8,
    value_stride: usize,
    width: usize,
    height: usize,
    lo: *const u8,
    lo_stride: usize,
    hi: *const u8,
    hi_stride: usize,
    weight: u16,
    difference: *mut u8,
    difference_stride: usize,
) {
    debug_assert!(width >= LANES);
    let aligned = is_aligned(value, value_stride, ALIGNMENT)
        && is_aligned(lo, lo_stride, ALIGNMENT)
        && is_aligned(hi, hi_stride, ALIGNMENT)
        && is_aligned(difference, difference_stride, ALIGNMENT);
    if aligned {
        add_feature_difference_rows::<true>(
            value, value_stride, width, height, lo, lo_stride, hi, hi_stride, weight, difference,
            difference_stride,
        )
    } else {
        add_feature_difference_rows::<false>(
            value, value_stride, width, height, lo, lo_stride, hi, hi_stride, weight, difference,
            difference_stride,
        )
    }
}

#[target_feature(enable = "avx2")]
#[allow(clippy::too_many_arguments)]
unsafe fn add_feature_difference_rows<const ALIGN: bool>(
    mut value: *const u8,
    value_stride: usize,
    width: usize,
    height: usize,
    mut lo: *const u8,
    lo_stride: usize,
    mut hi: *const u8,
    hi_stride: usize,
    weight: u16,
    mut difference: *mut u8,
    difference_stride: usize,
) {
    let plan = RowPlan::new(width, LANES);
    let full = _mm256_set1_epi8(-1);
    let weight = _mm256_set1_epi16(weight as i16);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            update_32::<ALIGN>(value, lo, hi, difference, col, weight, full);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            update_32::<false>(
                value,
                lo,
                hi,
                difference,
                anchor,
                weight,
                tail_mask(plan.tail_len),
            );
        }
        value = value.add(value_stride);
        lo = lo.add(lo_stride);
        hi = hi.add(hi_stride);
        difference = difference.add(difference_stride);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn run_pair(width: usize, height: usize, weight: u16, repeats: usize) {
        let value = random_view(PixelFormat::Gray8, width, height, 91);
        let lo = random_view(PixelFormat::Gray8, width, height, 92);
        let hi = random_view(PixelFormat::Gray8, width, height, 93);
        let mut expected = random_view(PixelFormat::Gray8, width, height, 94);
        let mut actual = random_view(PixelFormat::Gray8, width, height, 94);
        for _ in 0..repeats {
            unsafe {
                super::super::generic::add_feature_difference(
                    value.as_ptr(), value.stride(), width, height,
                    lo.as_ptr(), lo.stride(), hi.as_ptr(), hi.stride(),
                    weight, expected.as_mut_ptr(), expected.stride(),
                );
                super::add_feature_difference(
                    value.as_ptr(), value.stride(), width, height,
                    lo.as_ptr(), lo.stride(), hi.as_ptr(), hi.stride(),
                    weight, actual.as_mut_ptr(), actual.stride(),
                );
            }
        }
        assert_equivalent(
            &actual,
            &expected,
            &Tolerance::exact(),
            "avx2 add_feature_difference",
        );
    }

    #[rstest]
    #[case(W, H)]
    #[case(W + 1, H - 1)]
    #[case(W - 1, H + 1)]
    fn matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_avx2() {
            return;
        }
        run_pair(width, height, 0x4000, 1);
    }

    #[rstest]
    fn repeated_calls_do_not_double_count_the_tail() {
        if !has_avx2() {
            return;
        }
        run_pair(W + 5, 8, 0x1000, 3);
    }
}
