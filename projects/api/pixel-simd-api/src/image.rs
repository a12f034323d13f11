//! Borrowed, validated image views.

use crate::error::TransformError;
use pixel_simd_common::pixel_format::PixelFormat;

fn validate(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> Result<(), TransformError> {
    let row_bytes = width * format.bytes_per_pixel();
    if stride < row_bytes {
        return Err(TransformError::InvalidStride {
            stride,
            width,
            bytes_per_pixel: format.bytes_per_pixel(),
        });
    }
    // The final row only needs its visible bytes, not the full stride.
    let needed = if height == 0 || width == 0 {
        0
    } else {
        stride * (height - 1) + row_bytes
    };
    if len < needed {
        return Err(TransformError::BufferTooSmall { needed, actual: len });
    }
    Ok(())
}

/// A read-only view of a caller-owned strided image buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageRef<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> ImageRef<'a> {
    /// Wraps `data` as a `width x height` image with `stride` bytes between
    /// row starts, validating the stride and buffer length.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, TransformError> {
        validate(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between row starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }
}

/// A mutable view of a caller-owned strided image buffer.
#[derive(Debug)]
pub struct ImageMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> ImageMut<'a> {
    /// Wraps `data` as a `width x height` image with `stride` bytes between
    /// row starts, validating the stride and buffer length.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, TransformError> {
        validate(data.len(), width, height, stride, format)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between row starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel layout.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr()
    }
}
