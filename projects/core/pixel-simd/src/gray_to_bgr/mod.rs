//! Grayscale to 24-bit BGR conversion.
//!
//! Pure overwrite transform; the overlapping tail op recomputes columns.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod ssse3;

use pixel_simd_common::cpu_detect::has_ssse3;
use pixel_simd_common::isa::Isa;

/// The implementation [`gray_to_bgr`] will run for an image of this width.
#[inline]
pub fn selected_isa(width: usize) -> Isa {
    if has_ssse3() && width >= Isa::Ssse3.lanes() {
        return Isa::Ssse3;
    }
    Isa::Scalar
}

/// Converts an 8-bit grayscale image to BGR, replicating the gray value into
/// all three channels.
///
/// # Safety
///
/// - `gray` must be valid for reads of `gray_stride * (height - 1) + width` bytes
/// - `bgr` must be valid for writes of `bgr_stride * (height - 1) + width * 3` bytes
/// - `gray_stride >= width` and `bgr_stride >= width * 3`
#[inline]
pub unsafe fn gray_to_bgr(
    gray: *const u8,
    width: usize,
    height: usize,
    gray_stride: usize,
    bgr: *mut u8,
    bgr_stride: usize,
) {
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Ssse3 => ssse3::gray_to_bgr(gray, width, height, gray_stride, bgr, bgr_stride),
        _ => generic::gray_to_bgr(gray, width, height, gray_stride, bgr, bgr_stride),
    }
}
