//! Safe wrappers over the raw kernels.
//!
//! Each wrapper validates the cross-image contract the core documents as
//! undefined behavior, then dispatches. For inputs that pass validation the
//! kernels cannot fail.

use crate::error::TransformError;
use crate::image::{ImageMut, ImageRef};
use pixel_simd_common::pixel_format::PixelFormat;

fn ensure_format(actual: PixelFormat, expected: PixelFormat) -> Result<(), TransformError> {
    if actual != expected {
        return Err(TransformError::FormatMismatch { expected, actual });
    }
    Ok(())
}

fn ensure_same_size(
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), TransformError> {
    if expected != actual {
        return Err(TransformError::SizeMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        });
    }
    Ok(())
}

fn ensure_half_planes(
    luma: &ImageRef<'_>,
    u: &ImageRef<'_>,
    v: &ImageRef<'_>,
) -> Result<(), TransformError> {
    if luma.width() % 2 != 0 || luma.height() % 2 != 0 {
        return Err(TransformError::InvalidParameter {
            name: "width/height (must be even for 4:2:0)",
            value: luma.width() as i64,
        });
    }
    let expected = (luma.width() / 2, luma.height() / 2);
    for plane in [u, v] {
        if (plane.width(), plane.height()) != expected {
            return Err(TransformError::InvalidPlaneDimensions {
                luma_width: luma.width(),
                luma_height: luma.height(),
                expected_width: expected.0,
                expected_height: expected.1,
                chroma_width: plane.width(),
                chroma_height: plane.height(),
            });
        }
    }
    Ok(())
}

/// Safe [`pixel_simd::gray_to_bgra`](pixel_simd::gray_to_bgra::gray_to_bgra).
pub fn gray_to_bgra(
    gray: &ImageRef<'_>,
    bgra: &mut ImageMut<'_>,
    alpha: u8,
) -> Result<(), TransformError> {
    ensure_format(gray.format(), PixelFormat::Gray8)?;
    ensure_format(bgra.format(), PixelFormat::Bgra32)?;
    ensure_same_size((gray.width(), gray.height()), (bgra.width(), bgra.height()))?;
    unsafe {
        pixel_simd::gray_to_bgra::gray_to_bgra(
            gray.as_ptr(),
            gray.width(),
            gray.height(),
            gray.stride(),
            bgra.as_mut_ptr(),
            bgra.stride(),
            alpha,
        );
    }
    Ok(())
}

/// Safe [`pixel_simd::gray_to_bgr`](pixel_simd::gray_to_bgr::gray_to_bgr).
pub fn gray_to_bgr(gray: &ImageRef<'_>, bgr: &mut ImageMut<'_>) -> Result<(), TransformError> {
    ensure_format(gray.format(), PixelFormat::Gray8)?;
    ensure_format(bgr.format(), PixelFormat::Bgr24)?;
    ensure_same_size((gray.width(), gray.height()), (bgr.width(), bgr.height()))?;
    unsafe {
        pixel_simd::gray_to_bgr::gray_to_bgr(
            gray.as_ptr(),
            gray.width(),
            gray.height(),
            gray.stride(),
            bgr.as_mut_ptr(),
            bgr.stride(),
        );
    }
    Ok(())
}

/// Safe [`pixel_simd::bgr_to_bgra`](pixel_simd::bgr_to_bgra::bgr_to_bgra).
pub fn bgr_to_bgra(
    bgr: &ImageRef<'_>,
    bgra: &mut ImageMut<'_>,
    alpha: u8,
) -> Result<(), TransformError> {
    ensure_format(bgr.format(), PixelFormat::Bgr24)?;
    ensure_format(bgra.format(), PixelFormat::Bgra32)?;
    ensure_same_size((bgr.width(), bgr.height()), (bgra.width(), bgra.height()))?;
    unsafe {
        pixel_simd::bgr_to_bgra::bgr_to_bgra(
            bgr.as_ptr(),
            bgr.width(),
            bgr.height(),
            bgr.stride(),
            bgra.as_mut_ptr(),
            bgra.stride(),
            alpha,
        );
    }
    Ok(())
}

fn ensure_yuv_gray(planes: [&ImageRef<'_>; 3]) -> Result<(), TransformError> {
    for plane in planes {
        ensure_format(plane.format(), PixelFormat::Gray8)?;
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::yuv444p_to_bgra`](pixel_simd::yuv_to_bgra::yuv444p_to_bgra).
pub fn yuv444p_to_bgra(
    y: &ImageRef<'_>,
    u: &ImageRef<'_>,
    v: &ImageRef<'_>,
    bgra: &mut ImageMut<'_>,
    alpha: u8,
) -> Result<(), TransformError> {
    ensure_yuv_gray([y, u, v])?;
    ensure_format(bgra.format(), PixelFormat::Bgra32)?;
    for plane in [u, v] {
        ensure_same_size((y.width(), y.height()), (plane.width(), plane.height()))?;
    }
    ensure_same_size((y.width(), y.height()), (bgra.width(), bgra.height()))?;
    unsafe {
        pixel_simd::yuv_to_bgra::yuv444p_to_bgra(
            y.as_ptr(),
            y.stride(),
            u.as_ptr(),
            u.stride(),
            v.as_ptr(),
            v.stride(),
            y.width(),
            y.height(),
            bgra.as_mut_ptr(),
            bgra.stride(),
            alpha,
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::yuv420p_to_bgra`](pixel_simd::yuv_to_bgra::yuv420p_to_bgra).
pub fn yuv420p_to_bgra(
    y: &ImageRef<'_>,
    u: &ImageRef<'_>,
    v: &ImageRef<'_>,
    bgra: &mut ImageMut<'_>,
    alpha: u8,
) -> Result<(), TransformError> {
    ensure_yuv_gray([y, u, v])?;
    ensure_format(bgra.format(), PixelFormat::Bgra32)?;
    ensure_half_planes(y, u, v)?;
    ensure_same_size((y.width(), y.height()), (bgra.width(), bgra.height()))?;
    unsafe {
        pixel_simd::yuv_to_bgra::yuv420p_to_bgra(
            y.as_ptr(),
            y.stride(),
            u.as_ptr(),
            u.stride(),
            v.as_ptr(),
            v.stride(),
            y.width(),
            y.height(),
            bgra.as_mut_ptr(),
            bgra.stride(),
            alpha,
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::yuv444p_to_hue`](pixel_simd::yuv_to_hue::yuv444p_to_hue).
pub fn yuv444p_to_hue(
    y: &ImageRef<'_>,
    u: &ImageRef<'_>,
    v: &ImageRef<'_>,
    hue: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    ensure_yuv_gray([y, u, v])?;
    ensure_format(hue.format(), PixelFormat::Gray8)?;
    for plane in [u, v] {
        ensure_same_size((y.width(), y.height()), (plane.width(), plane.height()))?;
    }
    ensure_same_size((y.width(), y.height()), (hue.width(), hue.height()))?;
    unsafe {
        pixel_simd::yuv_to_hue::yuv444p_to_hue(
            y.as_ptr(),
            y.stride(),
            u.as_ptr(),
            u.stride(),
            v.as_ptr(),
            v.stride(),
            y.width(),
            y.height(),
            hue.as_mut_ptr(),
            hue.stride(),
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::yuv420p_to_hue`](pixel_simd::yuv_to_hue::yuv420p_to_hue).
pub fn yuv420p_to_hue(
    y: &ImageRef<'_>,
    u: &ImageRef<'_>,
    v: &ImageRef<'_>,
    hue: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    ensure_yuv_gray([y, u, v])?;
    ensure_format(hue.format(), PixelFormat::Gray8)?;
    ensure_half_planes(y, u, v)?;
    ensure_same_size((y.width(), y.height()), (hue.width(), hue.height()))?;
    unsafe {
        pixel_simd::yuv_to_hue::yuv420p_to_hue(
            y.as_ptr(),
            y.stride(),
            u.as_ptr(),
            u.stride(),
            v.as_ptr(),
            v.stride(),
            y.width(),
            y.height(),
            hue.as_mut_ptr(),
            hue.stride(),
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::add_feature_difference`](pixel_simd::feature_difference::add_feature_difference).
pub fn add_feature_difference(
    value: &ImageRef<'_>,
    lo: &ImageRef<'_>,
    hi: &ImageRef<'_>,
    weight: u16,
    difference: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    for plane in [value, lo, hi] {
        ensure_format(plane.format(), PixelFormat::Gray8)?;
    }
    ensure_format(difference.format(), PixelFormat::Gray8)?;
    for plane in [lo, hi] {
        ensure_same_size((value.width(), value.height()), (plane.width(), plane.height()))?;
    }
    ensure_same_size(
        (value.width(), value.height()),
        (difference.width(), difference.height()),
    )?;
    unsafe {
        pixel_simd::feature_difference::add_feature_difference(
            value.as_ptr(),
            value.stride(),
            value.width(),
            value.height(),
            lo.as_ptr(),
            lo.stride(),
            hi.as_ptr(),
            hi.stride(),
            weight,
            difference.as_mut_ptr(),
            difference.stride(),
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::texture_boosted_saturated_gradient`](pixel_simd::texture::texture_boosted_saturated_gradient).
pub fn texture_boosted_saturated_gradient(
    src: &ImageRef<'_>,
    saturation: u8,
    boost: u8,
    dx: &mut ImageMut<'_>,
    dy: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    ensure_format(src.format(), PixelFormat::Gray8)?;
    ensure_format(dx.format(), PixelFormat::Gray8)?;
    ensure_format(dy.format(), PixelFormat::Gray8)?;
    ensure_same_size((src.width(), src.height()), (dx.width(), dx.height()))?;
    ensure_same_size((src.width(), src.height()), (dy.width(), dy.height()))?;
    if boost == 0 || 2 * saturation as u32 * boost as u32 > 255 {
        return Err(TransformError::InvalidParameter {
            name: "saturation * boost",
            value: saturation as i64 * boost as i64,
        });
    }
    unsafe {
        pixel_simd::texture::texture_boosted_saturated_gradient(
            src.as_ptr(),
            src.stride(),
            src.width(),
            src.height(),
            saturation,
            boost,
            dx.as_mut_ptr(),
            dx.stride(),
            dy.as_mut_ptr(),
            dy.stride(),
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::texture_boosted_uv`](pixel_simd::texture::texture_boosted_uv).
pub fn texture_boosted_uv(
    src: &ImageRef<'_>,
    boost: u8,
    dst: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    ensure_format(src.format(), PixelFormat::Gray8)?;
    ensure_format(dst.format(), PixelFormat::Gray8)?;
    ensure_same_size((src.width(), src.height()), (dst.width(), dst.height()))?;
    if boost == 0 || boost >= 0x80 {
        return Err(TransformError::InvalidParameter {
            name: "boost",
            value: boost as i64,
        });
    }
    unsafe {
        pixel_simd::texture::texture_boosted_uv(
            src.as_ptr(),
            src.stride(),
            src.width(),
            src.height(),
            boost,
            dst.as_mut_ptr(),
            dst.stride(),
        );
    }
    Ok(())
}

/// Safe
/// [`pixel_simd::texture_get_difference_sum`](pixel_simd::texture::texture_get_difference_sum).
pub fn texture_get_difference_sum(
    src: &ImageRef<'_>,
    lo: &ImageRef<'_>,
    hi: &ImageRef<'_>,
) -> Result<i64, TransformError> {
    for plane in [src, lo, hi] {
        ensure_format(plane.format(), PixelFormat::Gray8)?;
    }
    for plane in [lo, hi] {
        ensure_same_size((src.width(), src.height()), (plane.width(), plane.height()))?;
    }
    let sum = unsafe {
        pixel_simd::texture::texture_get_difference_sum(
            src.as_ptr(),
            src.stride(),
            src.width(),
            src.height(),
            lo.as_ptr(),
            lo.stride(),
            hi.as_ptr(),
            hi.stride(),
        )
    };
    Ok(sum)
}

/// Safe
/// [`pixel_simd::texture_perform_compensation`](pixel_simd::texture::texture_perform_compensation).
pub fn texture_perform_compensation(
    src: &ImageRef<'_>,
    shift: i32,
    dst: &mut ImageMut<'_>,
) -> Result<(), TransformError> {
    ensure_format(src.format(), PixelFormat::Gray8)?;
    ensure_format(dst.format(), PixelFormat::Gray8)?;
    ensure_same_size((src.width(), src.height()), (dst.width(), dst.height()))?;
    if !(-255..=255).contains(&shift) {
        return Err(TransformError::InvalidParameter {
            name: "shift",
            value: shift as i64,
        });
    }
    unsafe {
        pixel_simd::texture::texture_perform_compensation(
            src.as_ptr(),
            src.stride(),
            src.width(),
            src.height(),
            shift,
            dst.as_mut_ptr(),
            dst.stride(),
        );
    }
    Ok(())
}
