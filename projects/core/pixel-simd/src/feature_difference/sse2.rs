//! 128-bit implementation.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store, tail_mask, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

#[inline(always)]
unsafe fn feature_difference(value: __m128i, lo: __m128i, hi: __m128i) -> __m128i {
    _mm_max_epu8(_mm_subs_epu8(value, hi), _mm_subs_epu8(lo, value))
}

#[inline(always)]
unsafe fn shifted_weighted_square_16(difference: __m128i, weight: __m128i) -> __m128i {
    _mm_mulhi_epu16(_mm_mullo_epi16(difference, difference), weight)
}

#[inline(always)]
unsafe fn shifted_weighted_square_8(difference: __m128i, weight: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let lo = shifted_weighted_square_16(_mm_unpacklo_epi8(difference, zero), weight);
    let hi = shifted_weighted_square_16(_mm_unpackhi_epi8(difference, zero), weight);
    _mm_packus_epi16(lo, hi)
}

/// One 16-column update; `mask` zeroes the increment in overlap columns of
/// the tail op.
#[inline(always)]
unsafe fn update_16<const ALIGN: bool>(
    value: *const u8,
    lo: *const u8,
    hi: *const u8,
    difference: *mut u8,
    offset: usize,
    weight: __m128i,
    mask: __m128i,
) {
    let value = load::<ALIGN>(value.add(offset));
    let lo = load::<ALIGN>(lo.add(offset));
    let hi = load::<ALIGN>(hi.add(offset));
    let current = load::<ALIGN>(difference.add(offset));

    let excess = feature_difference(value, lo, hi);
    let increment = _mm_and_si128(mask, shifted_weighted_square_8(excess, weight));
    store::<ALIGN>(difference.add(offset), _mm_adds_epu8(current, increment));
}

/// # Safety
///
/// Same contract as [`super::add_feature_difference`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
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

#[target_feature(enable = "sse2")]
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
    let full = _mm_set1_epi8(-1);
    let weight = _mm_set1_epi16(weight as i16);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            update_16::<ALIGN>(value, lo, hi, difference, col, weight, full);
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            update_16::<false>(
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
