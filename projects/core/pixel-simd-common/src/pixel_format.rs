//! Pixel formats of the strided image buffers the kernels read and write.

use derive_enum_all_values::AllValues;

/// Pixel layout of an image buffer.
///
/// The discriminant is the per-pixel byte count, so the enum doubles as the
/// stride multiplier.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AllValues, Hash)]
pub enum PixelFormat {
    /// 8-bit single channel (grayscale, or one plane of a planar image).
    Gray8 = 1,
    /// 3x8-bit interleaved blue/green/red.
    Bgr24 = 3,
    /// 4x8-bit interleaved blue/green/red/alpha.
    Bgra32 = 4,
}

impl PixelFormat {
    /// Bytes each pixel of this format occupies within a row.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_byte_counts() {
        assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Bgr24.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Bgra32.bytes_per_pixel(), 4);
    }
}
