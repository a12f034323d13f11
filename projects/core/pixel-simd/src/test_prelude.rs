//! Common test imports and utilities for the kernel equivalence tests.
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Capability queries; a test returns early when its family is unavailable.
#[allow(unused_imports)] // Might be unused on some CPU architectures, and that's ok.
pub use pixel_simd_common::cpu_detect::*;
pub use pixel_simd_common::isa::Isa;

// Harness pieces
pub use pixel_simd_testing::{compare, fill_random, PixelFormat, Tolerance, View};

/// Nominal test width; the `±k` cases straddle lane boundaries around it.
pub(crate) const W: usize = 160;
/// Nominal test height.
pub(crate) const H: usize = 96;

/// An aligned view (64-byte row starts) filled with seeded random pixels.
pub(crate) fn random_view(format: PixelFormat, width: usize, height: usize, seed: u64) -> View {
    let mut view = View::new(format, width, height);
    fill_random(&mut view, seed);
    view
}

/// A view whose odd stride defeats the aligned row check, forcing the
/// unaligned code path.
pub(crate) fn random_view_unaligned(
    format: PixelFormat,
    width: usize,
    height: usize,
    seed: u64,
) -> View {
    let row_bytes = width * format.bytes_per_pixel();
    // An odd stride can never satisfy a 16- or 32-byte alignment check.
    let stride = row_bytes + 1 + (row_bytes & 1);
    let mut view = View::with_stride(format, width, height, stride);
    fill_random(&mut view, seed);
    view
}

/// Asserts `actual` matches `expected` under `tolerance`, printing the worst
/// difference and its location otherwise.
pub(crate) fn assert_equivalent(
    actual: &View,
    expected: &View,
    tolerance: &Tolerance,
    what: &str,
) {
    if let Err(mismatch) = compare(expected, actual, tolerance) {
        panic!("{what} diverged from the scalar reference: {mismatch}");
    }
}
