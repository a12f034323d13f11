//! Weighted feature-difference accumulation.
//!
//! For each pixel, the amount by which `value` escapes the `[lo, hi]`
//! background envelope is squared, scaled by a Q16 weight and added into the
//! caller's running `difference` buffer with u8 saturation.
//!
//! **Accumulating transform** (read-modify-write): the overlapping tail op
//! must AND its increment with the tail mask, otherwise the overlap columns
//! would be counted twice per call.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod avx2;
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use pixel_simd_common::cpu_detect::{has_avx2, has_sse2};
use pixel_simd_common::isa::Isa;

/// The implementation [`add_feature_difference`] will run for an image of
/// this width.
#[inline]
pub fn selected_isa(width: usize) -> Isa {
    if has_avx2() && width >= Isa::Avx2.lanes() {
        return Isa::Avx2;
    }
    if has_sse2() && width >= Isa::Sse2.lanes() {
        return Isa::Sse2;
    }
    Isa::Scalar
}

/// Accumulates the weighted squared feature difference of `value` against the
/// `[lo, hi]` envelope into `difference`.
///
/// `weight` is an unsigned Q16 fraction: 0x10000 would be weight 1.0.
///
/// # Safety
///
/// - `value`, `lo`, `hi` must each be valid for reads of
///   `stride * (height - 1) + width` bytes with their respective strides
/// - `difference` must be valid for reads and writes of
///   `difference_stride * (height - 1) + width` bytes
/// - every stride must cover one row of its plane
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn add_feature_difference(
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
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Avx2 => avx2::add_feature_difference(
            value, value_stride, width, height, lo, lo_stride, hi, hi_stride, weight, difference,
            difference_stride,
        ),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::add_feature_difference(
            value, value_stride, width, height, lo, lo_stride, hi, hi_stride, weight, difference,
            difference_stride,
        ),
        _ => generic::add_feature_difference(
            value, value_stride, width, height, lo, lo_stride, hi, hi_stride, weight, difference,
            difference_stride,
        ),
    }
}
