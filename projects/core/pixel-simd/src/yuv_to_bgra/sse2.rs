//! 128-bit implementations.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::sse2::{load, store_interleaved_bgra, ALIGNMENT, LANES};
use crate::yuv::sse2::{adjust, bgr_half, Weights};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

#[inline(always)]
unsafe fn convert_16<const ALIGN: bool>(
    y8: __m128i,
    u8v: __m128i,
    v8v: __m128i,
    alpha: __m128i,
    dst: *mut u8,
    k: &Weights,
) {
    let (y_lo, y_hi) = adjust(y8, k.y_adjust);
    let (u_lo, u_hi) = adjust(u8v, k.uv_adjust);
    let (v_lo, v_hi) = adjust(v8v, k.uv_adjust);

    let (b_lo, g_lo, r_lo) = bgr_half(y_lo, u_lo, v_lo, k);
    let (b_hi, g_hi, r_hi) = bgr_half(y_hi, u_hi, v_hi, k);

    store_interleaved_bgra::<ALIGN>(
        dst,
        _mm_packus_epi16(b_lo, b_hi),
        _mm_packus_epi16(g_lo, g_hi),
        _mm_packus_epi16(r_lo, r_hi),
        alpha,
    );
}

/// # Safety
///
/// Same contract as [`super::yuv444p_to_bgra`], plus `width >= 16`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn yuv444p_to_bgra(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    u_stride: usize,
    v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    debug_assert!(width >= LANES);
    let aligned = is_aligned(y, y_stride, ALIGNMENT)
        && is_aligned(u, u_stride, ALIGNMENT)
        && is_aligned(v, v_stride, ALIGNMENT)
        && is_aligned(bgra, bgra_stride, ALIGNMENT);
    if aligned {
        yuv444p_rows::<true>(y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha)
    } else {
        yuv444p_rows::<false>(y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha)
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
    mut bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let k = Weights::new();
    let alpha = _mm_set1_epi8(alpha as i8);
    let plan = RowPlan::new(width, LANES);
    for _ in 0..height {
        let mut col = 0;
        while col < plan.aligned_width {
            convert_16::<ALIGN>(
                load::<ALIGN>(y.add(col)),
                load::<ALIGN>(u.add(col)),
                load::<ALIGN>(v.add(col)),
                alpha,
                bgra.add(4 * col),
                &k,
            );
            col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            convert_16::<false>(
                load::<false>(y.add(anchor)),
                load::<false>(u.add(anchor)),
                load::<false>(v.add(anchor)),
                alpha,
                bgra.add(4 * anchor),
                &k,
            );
        }
        y = y.add(y_stride);
        u = u.add(u_stride);
        v = v.add(v_stride);
        bgra = bgra.add(bgra_stride);
    }
}

/// # Safety
///
/// Same contract as [`super::yuv420p_to_bgra`], plus `width >= 32`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn yuv420p_to_bgra(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    u_stride: usize,
    v: *const u8,
    v_stride: usize,
    width: usize,
    height: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    debug_assert!(width >= 2 * LANES);
    debug_assert!(width % 2 == 0 && height % 2 == 0);
    let aligned = is_aligned(y, y_stride, ALIGNMENT)
        && is_aligned(u, u_stride, ALIGNMENT)
        && is_aligned(v, v_stride, ALIGNMENT)
        && is_aligned(bgra, bgra_stride, ALIGNMENT);
    if aligned {
        yuv420p_rows::<true>(y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha)
    } else {
        yuv420p_rows::<false>(y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha)
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
    mut bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let k = Weights::new();
    let alpha = _mm_set1_epi8(alpha as i8);
    // One chroma vector covers 2 * LANES luma columns on two luma rows.
    let plan = RowPlan::new(width / 2, LANES);
    for _ in 0..height / 2 {
        let mut chroma_col = 0;
        while chroma_col < plan.aligned_width {
            convert_block::<ALIGN>(
                y, y_stride, u, v, chroma_col, alpha, bgra, bgra_stride, &k,
            );
            chroma_col += LANES;
        }
        if let Some(anchor) = plan.tail_anchor {
            convert_block::<false>(y, y_stride, u, v, anchor, alpha, bgra, bgra_stride, &k);
        }
        y = y.add(2 * y_stride);
        u = u.add(u_stride);
        v = v.add(v_stride);
        bgra = bgra.add(2 * bgra_stride);
    }
}

/// Converts the 2 x (2 * LANES) luma block covered by 16 chroma samples at
/// `chroma_col`.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
unsafe fn convert_block<const ALIGN: bool>(
    y: *const u8,
    y_stride: usize,
    u: *const u8,
    v: *const u8,
    chroma_col: usize,
    alpha: __m128i,
    bgra: *mut u8,
    bgra_stride: usize,
    k: &Weights,
) {
    let u8v = load::<ALIGN>(u.add(chroma_col));
    let v8v = load::<ALIGN>(v.add(chroma_col));
    // Each chroma sample is duplicated over two adjacent luma columns.
    let u_first = _mm_unpacklo_epi8(u8v, u8v);
    let u_second = _mm_unpackhi_epi8(u8v, u8v);
    let v_first = _mm_unpacklo_epi8(v8v, v8v);
    let v_second = _mm_unpackhi_epi8(v8v, v8v);

    let luma_col = 2 * chroma_col;
    for row_off in 0..2 {
        let y_row = y.add(row_off * y_stride + luma_col);
        let dst = bgra.add(row_off * bgra_stride + 4 * luma_col);
        convert_16::<ALIGN>(load::<ALIGN>(y_row), u_first, v_first, alpha, dst, k);
        convert_16::<ALIGN>(
            load::<ALIGN>(y_row.add(LANES)),
            u_second,
            v_second,
            alpha,
            dst.add(4 * LANES),
            k,
        );
    }
}
