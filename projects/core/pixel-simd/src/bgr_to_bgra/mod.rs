//! 24-bit BGR to 32-bit BGRA conversion with a constant alpha.
//!
//! Pure overwrite transform; the overlapping tail op recomputes columns.

pub mod generic;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod ssse3;

use pixel_simd_common::cpu_detect::has_ssse3;
use pixel_simd_common::isa::Isa;

/// The implementation [`bgr_to_bgra`] will run for an image of this width.
#[inline]
pub fn selected_isa(width: usize) -> Isa {
    if has_ssse3() && width >= Isa::Ssse3.lanes() {
        return Isa::Ssse3;
    }
    Isa::Scalar
}

/// Expands a BGR image to BGRA, storing `alpha` into the fourth channel.
///
/// # Safety
///
/// - `bgr` must be valid for reads of `bgr_stride * (height - 1) + width * 3` bytes
/// - `bgra` must be valid for writes of `bgra_stride * (height - 1) + width * 4` bytes
/// - `bgr_stride >= width * 3` and `bgra_stride >= width * 4`
#[inline]
pub unsafe fn bgr_to_bgra(
    bgr: *const u8,
    width: usize,
    height: usize,
    bgr_stride: usize,
    bgra: *mut u8,
    bgra_stride: usize,
    alpha: u8,
) {
    match selected_isa(width) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        Isa::Ssse3 => ssse3::bgr_to_bgra(bgr, width, height, bgr_stride, bgra, bgra_stride, alpha),
        _ => generic::bgr_to_bgra(bgr, width, height, bgr_stride, bgra, bgra_stride, alpha),
    }
}
