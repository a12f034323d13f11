//! Planar YUV to 32-bit BGRA conversion, 4:4:4 and 4:2:0 chroma sampling.
//!
//! Pure overwrite transforms; the overlapping tail op recomputes columns.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod avx2;
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use pixel_simd_common::cpu_detect::{has_avx2, has_sse2};
use pixel_simd_common::isa::Isa;

/// The implementation [`yuv444p_to_bgra`] will run for an image of this width.
#[inline]
pub fn selected_isa_444(width: usize) -> Isa {
    if has_avx2() && width >= Isa::Avx2.lanes() {
        return Isa::Avx2;
    }
    if has_sse2() && width >= Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// The implementation [`yuv420p_to_bgra`] will run for an image of this width.
///
/// The 4:2:0 kernels consume a full chroma vector per step and therefore need
/// twice the lane count in luma columns.
#[inline]
pub fn selected_isa_420(width: usize) -> Isa {
    if has_avx2() && width >= 2 * Isa::Avx2.lanes() {
        return Isa::Avx2;
    }
    if has_sse2() && width >= 2 * Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// Converts planar 4:4:4 YUV (one chroma sample per pixel) to BGRA.
///
/// # Safety
///
/// - `y`, `u`, `v` must each be valid for reads of
///   `stride * (height - 1) + width` bytes with their respective strides
/// - `bgra` must be valid for writes of `bgra_stride * (height - 1) + width * 4` bytes
/// - every stride must cover one row of its plane
#[inline]
pub unsafe fn yuv444p_to_bgra(
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
    match selected_isa_444(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Avx2 => avx2::yuv444p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::yuv444p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
        _ => generic::yuv444p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
    }
}

/// Converts planar 4:2:0 YUV (one chroma sample per 2x2 luma block) to BGRA.
///
/// # Safety
///
/// - same as [`yuv444p_to_bgra`], except `u` and `v` are `(width / 2) x
///   (height / 2)` planes
/// - `width` and `height` must be even
#[inline]
pub unsafe fn yuv420p_to_bgra(
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
    debug_assert!(width % 2 == 0 && height % 2 == 0);
    match selected_isa_420(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Avx2 => avx2::yuv420p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::yuv420p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
        _ => generic::yuv420p_to_bgra(
            y, y_stride, u, u_stride, v, v_stride, width, height, bgra, bgra_stride, alpha,
        ),
    }
}
