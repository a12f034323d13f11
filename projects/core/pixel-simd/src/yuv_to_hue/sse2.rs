//! 128-bit implementations.
//!
//! RGB reconstruction reuses the shared fixed-point pipeline; the sextant
//! division runs in f32 exactly like the scalar reference.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store, ALIGNMENT, LANES};
use crate::yuv::sse2::{adjust, bgr_half, Weights};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

const HUE_SCALE: f32 = 255.0 / 6.0;

/// Clamps signed 16-bit channel values into [0, 255].
#[inline(always)]
unsafe fn clamp_channel(value: __m128i) -> __m128i {
    _mm_min_epi16(_mm_max_epi16(value, _mm_setzero_si128()), _mm_set1_epi16(255))
}

/// Truncated `(dividend / range) * (255 / 6)` for 4 lanes; garbage where
/// `range == 0` (masked by the caller).
#[inline(always)]
unsafe fn hue_quarter(dividend: __m128i, range: __m128i) -> __m128i {
    _mm_cvttps_epi32(_mm_mul_ps(
        _mm_div_ps(_mm_cvtepi32_ps(dividend), _mm_cvtepi32_ps(range)),
        _mm_set1_ps(HUE_SCALE),
    ))
}

/// Hue for 8 reconstructed pixels held as adjusted 16-bit YUV samples.
#[inline(always)]
unsafe fn hue_half(y16: __m128i, u16: __m128i, v16: __m128i, k: &Weights) -> __m128i {
    let (blue, green, red) = bgr_half(y16, u16, v16, k);
    let blue = clamp_channel(blue);
    let green = clamp_channel(green);
    let red = clamp_channel(red);

    let max = _mm_max_epi16(red, _mm_max_epi16(green, blue));
    let min = _mm_min_epi16(red, _mm_min_epi16(green, blue));
    let range = _mm_sub_epi16(max, min);

    let range_2 = _mm_add_epi16(range, range);
    let range_4 = _mm_add_epi16(range_2, range_2);
    let range_6 = _mm_add_epi16(range_4, range_2);

    let red_max = _mm_cmpeq_epi16(red, max);
    let green_max = _mm_andnot_si128(red_max, _mm_cmpeq_epi16(green, max));
    let blue_max = _mm_andnot_si128(
        _mm_or_si128(red_max, green_max),
        _mm_cmpeq_epi16(range, range),
    );

    let wrap = _mm_and_si128(_mm_cmplt_epi16(green, blue), range_6);
    let red_dividend = _mm_add_epi16(_mm_sub_epi16(green, blue), wrap);
    let green_dividend = _mm_add_epi16(_mm_sub_epi16(blue, red), range_2);
    let blue_dividend = _mm_add_epi16(_mm_sub_epi16(red, green), range_4);

    let dividend = _mm_or_si128(
        _mm_and_si128(red_max, red_dividend),
        _mm_or_si128(
            _mm_and_si128(green_max, green_dividend),
            _mm_and_si128(blue_max, blue_dividend),
        ),
    );

    let zero = _mm_setzero_si128();
    let hue = _mm_packs_epi32(
        hue_quarter(_mm_unpacklo_epi16(dividend, zero), _mm_unpacklo_epi16(range, zero)),
        hue_quarter(_mm_unpackhi_epi16(dividend, zero), _mm_unpackhi_epi16(range, zero)),
    );
    // Achromatic lanes divided 0/0; force them to hue 0.
    _mm_and_si128(hue, _mm_cmpgt_epi16(range, zero))
}

#[inline(always)]
unsafe fn hue_16<const ALIGN: bool>(
    y8: __m128i,
    u8v: __m128i,
    v8v: __m128i,
    dst: *mut u8,
    k: &Weights,
) {
    let (y_lo, y_hi) = adjust(y8, k.y_adjust);
    let (u_lo, u_hi) = adjust(u8v, k.uv_adjust);
    let (v_lo, v_hi) = adjust(v8v, k.uv_adjust);
    let hue = _mm_packus_epi16(
        hue_half(y_lo, u_lo, v_lo, k),
        hue_half(y_hi, u_hi, v_hi, k),
    );
    store::<ALIGN>(dst, hue);
}

/// # Safety
///
/// Same contract as [`super::yuv444p_to_hue`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn yuv444p_to_hue(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    u_stride: usize,
    v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    hue: *mut u8,
    hue_stride: usize,
) {
    debug_assert!(width >= LANES);
    let aligned = is_aligned(y, y_stride, ALIGNMENT)
        && is_aligned(u, u_stride, ALIGNMENT)
        && is_aligned(v, v_stride, ALIGNMENT)
        && is_aligned(hue, hue_stride, ALIGNMENT);
    if aligned {
        yuv444p_rows::<true>(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
    } else {
        yuv444p_rows::<false>(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
    }
}

#[target_feature(enable = "sse2")]
#[allow(clippy::too_many_arguments)]
unsafe fn yuv444p_rows<const ALIGN: bool>(
    mut y: *const u8,
    y_stride: usize,
    mut u: *const u8,
    u_stride: usize,
    mut v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    mut hue: *mut u8,
    hue_stride: usize,
) {
    let k = Weights::new();
    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            hue_16::<ALIGN>(
                load::<ALIGN>(y.add(col)),
                load::<ALIGN>(u.add(col)),
                load::<ALIGN>(v.add(col)),
                hue.add(col),
                &k,
            );
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            hue_16::<false>(
                load::<false>(y.add(anchor)),
                load::<false>(u.add(anchor)),
                load::<false>(v.add(anchor)),
                hue.add(anchor),
                &k,
            );
        }
        y = y.add(y_stride);
        u = u.add(u_stride);
        v = v.add(v_stride);
        hue = hue.add(hue_stride);
    }
}

/// # Safety
///
/// Same contract as [`super::yuv420p_to_hue`], plus `width >= 32`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn yuv420p_to_hue(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    u_stride: usize,
    v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    hue: *mut u8,
    hue_stride: usize,
) {
    debug_assert!(width >= 2 * LANES);
    debug_assert!(width % 2 == 0 && height % 2 == 0);
    let aligned = is_aligned(y, y_stride, ALIGNMENT)
        && is_aligned(u, u_stride, ALIGNMENT)
        && is_aligned(v, v_stride, ALIGNMENT)
        && is_aligned(hue, hue_stride, ALIGNMENT);
    if aligned {
        yuv420p_rows::<true>(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
    } else {
        yuv420p_rows::<false>(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
    }
}

#[target_feature(enable = "sse2")]
#[allow(clippy::too_many_arguments)]
unsafe fn yuv420p_rows<const ALIGN: bool>(
    mut y: *const u8,
    y_stride: usize,
    mut u: *const u8,
    u_stride: usize,
    mut v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    mut hue: *mut u8,
    hue_stride: usize,
) {
    let k = Weights::new();
    let plan = RowPlan::new(width / 2, LANES);
    for _ in 0..height / 2 {
        let mut chroma_col = 0;
        while chroma_col < plan.aligned_width {
            hue_block::<ALIGN>(y, y_stride, u, v, chroma_col, hue, hue_stride, &k);
            chroma_col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            hue_block::<false>(y, y_stride, u, v, anchor, hue, hue_stride, &k);
        }
        y = y.add(2 * y_stride);
        u = u.add(u_stride);
        v = v.add(v_stride);
        hue = hue.add(2 * hue_stride);
    }
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
unsafe fn hue_block<const ALIGN: bool>(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    v: *const u8,
    chroma_col: usize,
    hue: *mut u8,
    hue_stride: usize,
    k: &Weights,
) {
    let u8v = load::<ALIGN>(u.add(chroma_col));
    let v8v = load::<ALIGN>(v.add(chroma_col));
    let u_first = _mm_unpacklo_epi8(u8v, u8v);
    let u_second = _mm_unpackhi_epi8(u8v, u8v);
    let v_first = _mm_unpacklo_epi8(v8v, v8v);
    let v_second = _mm_unpackhi_epi8(v8v, v8v);

    let luma_col = 2 * chroma_col;
    for row_off in 0..2 {
        let y_row = y.add(row_off * y_stride + luma_col);
        let dst = hue.add(row_off * hue_stride + luma_col);
        hue_16::<ALIGN>(load::<ALIGN>(y_row), u_first, v_first, dst, k);
        hue_16::<ALIGN>(load::<ALIGN>(y_row.add(LANES)), u_second, v_second, dst.add(LANES), k);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[rstest]
    #[case(W, H)]
    #[case(W + 1, H - 1)]
    #[case(W - 1, H + 1)]
    fn yuv444_matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_sse2() {
            return;
        }
        let y = random_view(PixelFormat::Gray8, width, height, 71);
        let u = random_view(PixelFormat::Gray8, width, height, 72);
        let v = random_view(PixelFormat::Gray8, width, height, 73);
        let mut expected = View::new(PixelFormat::Gray8, width, height);
        let mut actual = View::new(PixelFormat::Gray8, width, height);
        unsafe {
            super::super::generic::yuv444p_to_hue(
                y.as_ptr(), y.stride(), u.as_ptr(), u.stride(), v.as_ptr(), v.stride(),
                width, height, expected.as_mut_ptr(), expected.stride(),
            );
            super::yuv444p_to_hue(
                y.as_ptr(), y.stride(), u.as_ptr(), u.stride(), v.as_ptr(), v.stride(),
                width, height, actual.as_mut_ptr(), actual.stride(),
            );
        }
        // Hue is an angle, so compare cyclically; the stray-pixel allowance
        // covers platforms whose f32 division rounds differently.
        assert_equivalent(&actual, &expected, &Tolerance::cyclic(64, 256), "sse2 yuv444p_to_hue");
    }

    #[rstest]
    #[case(W, H)]
    #[case(W + 2, H - 2)]
    #[case(W - 2, H + 2)]
    fn yuv420_matches_reference(#[case] width: usize, #[case] height: usize) {
        if !has_sse2() {
            return;
        }
        let y = random_view(PixelFormat::Gray8, width, height, 74);
        let u = random_view(PixelFormat::Gray8, width / 2, height / 2, 75);
        let v = random_view(PixelFormat::Gray8, width / 2, height / 2, 76);
        let mut expected = View::new(PixelFormat::Gray8, width, height);
        let mut actual = View::new(PixelFormat::Gray8, width, height);
        unsafe {
            super::super::generic::yuv420p_to_hue(
                y.as_ptr(), y.stride(), u.as_ptr(), u.stride(), v.as_ptr(), v.stride(),
                width, height, expected.as_mut_ptr(), expected.stride(),
            );
            super::yuv420p_to_hue(
                y.as_ptr(), y.stride(), u.as_ptr(), u.stride(), v.as_ptr(), v.stride(),
                width, height, actual.as_mut_ptr(), actual.stride(),
            );
        }
        assert_equivalent(&actual, &expected, &Tolerance::cyclic(64, 256), "sse2 yuv420p_to_hue");
    }
}
