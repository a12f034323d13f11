//! Planar YUV to 8-bit hue extraction, 4:4:4 and 4:2:0 chroma sampling.
//!
//! Hue is the sextant angle of the reconstructed RGB value scaled to
//! `[0, 255)`; achromatic pixels (zero range) report hue 0. The
//! dividend/range division happens in f32 with the same operation order in
//! the scalar and vector paths, so their outputs agree exactly on one
//! machine; the harness still compares hue cyclically since 0 and 255 are
//! adjacent angles.
//!
//! Pure overwrite transforms; the overlapping tail op recomputes columns.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use pixel_simd_common::cpu_detect::has_sse2;
use pixel_simd_common::isa::Isa;

/// The implementation [`yuv444p_to_hue`] will run for an image of this width.
#[inline]
pub fn selected_isa_444(width: usize) -> Isa {
    if has_sse2() && width >= Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// The implementation [`yuv420p_to_hue`] will run for an image of this width.
#[inline]
pub fn selected_isa_420(width: usize) -> Isa {
    if has_sse2() && width >= 2 * Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// Computes per-pixel hue from planar 4:4:4 YUV.
///
/// # Safety
///
/// - `y`, `u`, `v` must each be valid for reads of
///   `stride * (height - 1) + width` bytes with their respective strides
/// - `hue` must be valid for writes of `hue_stride * (height - 1) + width` bytes
/// - every stride must cover one row of its plane
#[inline]
pub unsafe fn yuv444p_to_hue(
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
    match selected_isa_444(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => {
            sse2::yuv444p_to_hue(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
        }
        _ => generic::yuv444p_to_hue(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride),
    }
}

/// Computes per-pixel hue from planar 4:2:0 YUV.
///
/// # Safety
///
/// - same as [`yuv444p_to_hue`], except `u` and `v` are `(width / 2) x
///   (height / 2)` planes
/// - `width` and `height` must be even
#[inline]
pub unsafe fn yuv420p_to_hue(
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
    debug_assert!(width % 2 == 0 && height % 2 == 0);
    match selected_isa_420(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => {
            sse2::yuv420p_to_hue(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride)
        }
        _ => generic::yuv420p_to_hue(y, y_stride, u, u_stride, v, v_stride, width, height, hue, hue_stride),
    }
}
