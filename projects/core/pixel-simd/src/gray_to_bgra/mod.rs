//! Grayscale to 32-bit BGRA conversion with a constant alpha.
//!
//! Pure overwrite transform: the overlapping tail op recomputes columns the
//! aligned loop already produced, which is idempotent.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod avx2;
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use pixel_simd_common::cpu_detect::{has_avx2, has_sse2};
use pixel_simd_common::isa::Isa;

/// The implementation [`gray_to_bgra`] will run for an image of this width.
///
/// Deterministic for a fixed machine and width: the widest family whose
/// capability flag is set and whose lane count fits the width wins.
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

/// Converts an 8-bit grayscale image to BGRA, replicating the gray value into
/// the three color channels and storing `alpha` into the fourth.
///
/// # Safety
///
/// - `gray` must be valid for reads of `gray_stride * (height - 1) + width` bytes
/// - `bgra` must be valid for writes of `bgra_stride * (height - 1) + width * 4` bytes
/// - `gray_stride >= width` and `bgra_stride >= width * 4`
#[inline]
pub unsafe fn gray_to_bgra(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Avx2 => avx2::gray_to_bgra(gray, width, height, gray_stride, bgra, bgra_stride, alpha),
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Sse2 => sse2::gray_to_bgra(gray, width, height, gray_stride, bgra, bgra_stride, alpha),
        _ => generic::gray_to_bgra(gray, width, height, gray_stride, bgra, bgra_stride, alpha),
    }
}
