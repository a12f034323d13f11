#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

mod compare;
mod fill;
mod golden;
mod view;

pub use compare::{compare, compare_value, Mismatch, Tolerance, ValueMismatch};
pub use fill::fill_random;
pub use golden::{
    golden_case, Fixture, FixtureImage, FixtureSet, FixtureStore, GoldenError, GoldenFailure,
    GoldenOutcome,
};
pub use pixel_simd_common::pixel_format::PixelFormat;
pub use view::View;
