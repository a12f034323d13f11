#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

mod error;
mod image;
mod ops;

pub use error::TransformError;
pub use image::{ImageMut, ImageRef};
pub use ops::*;
pub use pixel_simd_common::pixel_format::PixelFormat;
