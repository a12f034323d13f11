//! Texture feature kernels: boosted saturated gradients, UV boosting,
//! background difference sums and brightness compensation.
//!
//! All four overwrite their outputs except
//! [`texture_get_difference_sum`], which accumulates into a scalar and
//! therefore masks the loaded inputs of its overlapping tail op.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use likely_stable::unlikely;
use pixel_simd_common::cpu_detect::has_sse2;
use pixel_simd_common::isa::Isa;

/// The implementation the width-regular texture kernels
/// ([`texture_boosted_uv`], [`texture_get_difference_sum`],
/// [`texture_perform_compensation`]) will run for an image of this width.
#[inline]
pub fn selected_isa(width: usize) -> Isa {
    if has_sse2() && width >= Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// The implementation [`texture_boosted_saturated_gradient`] will run for an
/// image of this width.
///
/// The gradient reads one column to each side, so the vector path needs two
/// extra columns beyond the lane count.
#[inline]
pub fn selected_isa_gradient(width: usize) -> Isa {
    if has_sse2() && width >= Isa::Sse2.lanes() + 2 {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// Computes boosted, saturation-clamped central-difference gradients.
///
/// For interior pixels `dx = (clamp(src[x+1] - src[x-1], ±saturation) +
/// saturation) * boost` and `dy` likewise with the rows above and below.
/// Border rows and columns are written as 0.
///
/// # Safety
///
/// - `src` must be valid for reads of `src_stride * (height - 1) + width` bytes
/// - `dx` and `dy` must each be valid for writes of
///   `stride * (height - 1) + width` bytes with their respective strides
/// - every stride must cover one row of its plane
/// - `2 * saturation * boost` must not exceed 255
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn texture_boosted_saturated_gradient(
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
    debug_assert!(2 * saturation as u32 * boost as u32 <= 255);
    match selected_isa_gradient(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::texture_boosted_saturated_gradient(
            src, src_stride, width, height, saturation, boost, dx, dx_stride, dy, dy_stride,
        ),
        _ => generic::texture_boosted_saturated_gradient(
            src, src_stride, width, height, saturation, boost, dx, dx_stride, dy, dy_stride,
        ),
    }
}

/// Stretches chroma values around 128 by `boost`, clamping the input to the
/// representable window first.
///
/// # Safety
///
/// - `src` must be valid for reads of `src_stride * (height - 1) + width` bytes
/// - `dst` must be valid for writes of `dst_stride * (height - 1) + width` bytes
/// - both strides must cover one row
/// - `boost` must be in `[1, 127]`
#[inline]
pub unsafe fn texture_boosted_uv(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    boost: u8,
    dst: *mut u8,
    dst_stride: usize,
) {
    debug_assert!(boost >= 1 && boost < 0x80);
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::texture_boosted_uv(src, src_stride, width, height, boost, dst, dst_stride),
        _ => generic::texture_boosted_uv(src, src_stride, width, height, boost, dst, dst_stride),
    }
}

/// Sums `src - avg(lo, hi)` over the image, returning the signed total.
///
/// **Accumulating transform**: the vector path masks the loaded inputs of the
/// overlapping tail op so overlap columns contribute exactly once.
///
/// # Safety
///
/// - `src`, `lo`, `hi` must each be valid for reads of
///   `stride * (height - 1) + width` bytes with their respective strides
/// - every stride must cover one row
#[inline]
pub unsafe fn texture_get_difference_sum(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    lo: *const u8,
    lo_stride: usize,
    hi: *const u8,
    hi_stride: usize,
) -> i64 {
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::texture_get_difference_sum(
            src, src_stride, width, height, lo, lo_stride, hi, hi_stride,
        ),
        _ => generic::texture_get_difference_sum(
            src, src_stride, width, height, lo, lo_stride, hi, hi_stride,
        ),
    }
}

/// Adds `shift` to every pixel with saturation at both ends of the range.
///
/// A zero shift degenerates to a row copy regardless of the selected family.
///
/// # Safety
///
/// - `src` must be valid for reads of `src_stride * (height - 1) + width` bytes
/// - `dst` must be valid for writes of `dst_stride * (height - 1) + width` bytes
/// - both strides must cover one row
/// - `shift` must be in `[-255, 255]`
#[inline]
pub unsafe fn texture_perform_compensation(
    src: *const u8,
    src_stride: usize,
    width: usize,
    height: usize,
    shift: i32,
    dst: *mut u8,
    dst_stride: usize,
) {
    debug_assert!((-255..=255).contains(&shift));
    if unlikely(shift == 0) {
        generic::copy_rows(src, src_stride, width, height, dst, dst_stride);
        return;
    }
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::texture_perform_compensation(
            src, src_stride, width, height, shift, dst, dst_stride,
        ),
        _ => generic::texture_perform_compensation(
            src, src_stride, width, height, shift, dst, dst_stride,
        ),
    }
}
