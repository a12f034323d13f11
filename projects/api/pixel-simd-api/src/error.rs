//! Error types for the safe transform wrappers.

use pixel_simd_common::pixel_format::PixelFormat;
use thiserror::Error;

/// A caller contract violation caught before any kernel ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The stride cannot hold one row of pixels.
    #[error("stride {stride} cannot hold a row of {width} pixels at {bytes_per_pixel} bytes each")]
    InvalidStride {
        /// Offending stride in bytes.
        stride: usize,
        /// Row width in pixels.
        width: usize,
        /// Bytes per pixel of the view's format.
        bytes_per_pixel: usize,
    },

    /// The buffer is shorter than the view it is supposed to back.
    #[error("buffer too small: need {needed} bytes, but only {actual} bytes available")]
    BufferTooSmall {
        /// Required byte count.
        needed: usize,
        /// Provided byte count.
        actual: usize,
    },

    /// An image does not have the pixel format the operation requires.
    #[error("pixel format mismatch: expected {expected:?}, got {actual:?}")]
    FormatMismatch {
        /// Format the operation requires.
        expected: PixelFormat,
        /// Format the caller provided.
        actual: PixelFormat,
    },

    /// Two images that must share a shape do not.
    #[error("image size mismatch: {expected_width}x{expected_height} vs {actual_width}x{actual_height}")]
    SizeMismatch {
        /// Width of the reference image.
        expected_width: usize,
        /// Height of the reference image.
        expected_height: usize,
        /// Width of the mismatching image.
        actual_width: usize,
        /// Height of the mismatching image.
        actual_height: usize,
    },

    /// A subsampled chroma plane does not match its luma plane.
    #[error("chroma plane is {chroma_width}x{chroma_height}, expected {expected_width}x{expected_height} for a {luma_width}x{luma_height} image")]
    InvalidPlaneDimensions {
        /// Luma width.
        luma_width: usize,
        /// Luma height.
        luma_height: usize,
        /// Required chroma width.
        expected_width: usize,
        /// Required chroma height.
        expected_height: usize,
        /// Provided chroma width.
        chroma_width: usize,
        /// Provided chroma height.
        chroma_height: usize,
    },

    /// A scalar parameter is outside its documented range.
    #[error("parameter {name} out of range: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: i64,
    },
}
