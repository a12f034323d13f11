//! 256-bit implementation.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use crate::intrinsics::avx2::{load, store_interleaved_bgra, ALIGNMENT, LANES};
use pixel_simd_common::row_blocks::{is_aligned, RowPlan};

/// # Safety
///
/// Same contract as [`super::gray_to_bgra`], plus `width >= 32`.
#[target_feature(enable = "avx2")]
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

#[target_feature(enable = "avx2")]
unsafe fn gray_to_bgra_rows<const ALIGN: bool>(
    mut gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    mut bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    let alpha = _mm256_set1_epi8(alpha as i8);
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
