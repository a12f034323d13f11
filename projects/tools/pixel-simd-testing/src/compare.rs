//! Tolerance-based image comparison with failure diagnostics.

use crate::view::View;
use core::fmt;

/// Acceptable divergence between two kernel outputs.
///
/// Scalar and vector arithmetic may legitimately round differently (for
/// example a multiply-high against a widening multiply), so equality is
/// defined as "at most `max_difference_count` channel values differ by more
/// than `max_difference`". A non-zero `value_cycle` treats values as wrapping
/// (hue is an angle: 0 and 255 are one step apart).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerance {
    /// Largest per-channel absolute difference that still counts as equal.
    pub max_difference: u8,
    /// Number of channel values allowed to exceed `max_difference`.
    pub max_difference_count: usize,
    /// Wraparound period for cyclic quantities, 0 for plain magnitudes.
    pub value_cycle: u16,
}

impl Tolerance {
    /// Bit-exact comparison.
    pub const fn exact() -> Self {
        Self {
            max_difference: 0,
            max_difference_count: 0,
            value_cycle: 0,
        }
    }

    /// Allows up to `count` stray channel values, each off by any amount.
    pub const fn stray_pixels(count: usize) -> Self {
        Self {
            max_difference: 0,
            max_difference_count: count,
            value_cycle: 0,
        }
    }

    /// Like [`Tolerance::stray_pixels`] for values that wrap at `cycle`.
    pub const fn cyclic(count: usize, cycle: u16) -> Self {
        Self {
            max_difference: 0,
            max_difference_count: count,
            value_cycle: cycle,
        }
    }
}

/// Diagnostics for a failed comparison: where the outputs diverged worst and
/// by how much, plus the total number of diverging channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Largest observed channel difference.
    pub worst_difference: u16,
    /// Pixel x coordinate of the worst difference.
    pub worst_x: usize,
    /// Pixel y coordinate of the worst difference.
    pub worst_y: usize,
    /// Channel index of the worst difference within its pixel.
    pub worst_channel: usize,
    /// Number of channel values exceeding the tolerated difference.
    pub difference_count: usize,
    /// Number of channel values compared.
    pub compared: usize,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "worst difference {} at ({}, {}) channel {}; {} of {} channel values differ",
            self.worst_difference,
            self.worst_x,
            self.worst_y,
            self.worst_channel,
            self.difference_count,
            self.compared
        )
    }
}

/// Compares two images of identical shape under `tolerance`.
///
/// Panics if the shapes or formats differ; that is a harness bug, not a
/// kernel divergence.
pub fn compare(a: &View, b: &View, tolerance: &Tolerance) -> Result<(), Mismatch> {
    assert_eq!(a.format(), b.format(), "comparing different formats");
    assert_eq!(a.width(), b.width(), "comparing different widths");
    assert_eq!(a.height(), b.height(), "comparing different heights");

    let channels = a.format().bytes_per_pixel();
    let mut worst = Mismatch {
        worst_difference: 0,
        worst_x: 0,
        worst_y: 0,
        worst_channel: 0,
        difference_count: 0,
        compared: a.width() * a.height() * channels,
    };

    for y in 0..a.height() {
        let row_a = a.row(y);
        let row_b = b.row(y);
        for (i, (&va, &vb)) in row_a.iter().zip(row_b.iter()).enumerate() {
            let mut diff = (va as i16 - vb as i16).unsigned_abs();
            if tolerance.value_cycle != 0 {
                diff = diff.min(tolerance.value_cycle - diff);
            }
            if diff > tolerance.max_difference as u16 {
                worst.difference_count += 1;
                if diff > worst.worst_difference {
                    worst.worst_difference = diff;
                    worst.worst_x = i / channels;
                    worst.worst_y = y;
                    worst.worst_channel = i % channels;
                }
            }
        }
    }

    if worst.difference_count > tolerance.max_difference_count {
        Err(worst)
    } else {
        Ok(())
    }
}

/// Diagnostics for a diverging scalar result (e.g. a difference sum).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMismatch {
    /// Value the reference produced.
    pub expected: i64,
    /// Value the implementation under test produced.
    pub actual: i64,
}

impl fmt::Display for ValueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {}, got {} (difference {})",
            self.expected,
            self.actual,
            self.actual - self.expected
        )
    }
}

/// Compares two scalar kernel outputs exactly.
pub fn compare_value(expected: i64, actual: i64) -> Result<(), ValueMismatch> {
    if expected == actual {
        Ok(())
    } else {
        Err(ValueMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;
    use crate::PixelFormat;

    fn pair() -> (View, View) {
        (
            View::new(PixelFormat::Gray8, 8, 4),
            View::new(PixelFormat::Gray8, 8, 4),
        )
    }

    #[test]
    fn identical_images_pass_exact() {
        let (a, b) = pair();
        assert!(compare(&a, &b, &Tolerance::exact()).is_ok());
    }

    #[test]
    fn worst_difference_is_located() {
        let (a, mut b) = pair();
        b.row_mut(2)[5] = 17;
        b.row_mut(3)[1] = 3;
        let mismatch = compare(&a, &b, &Tolerance::exact()).unwrap_err();
        assert_eq!(mismatch.worst_difference, 17);
        assert_eq!((mismatch.worst_x, mismatch.worst_y), (5, 2));
        assert_eq!(mismatch.difference_count, 2);
    }

    #[test]
    fn stray_pixel_budget_is_honored() {
        let (a, mut b) = pair();
        b.row_mut(0)[0] = 200;
        assert!(compare(&a, &b, &Tolerance::stray_pixels(1)).is_ok());
        assert!(compare(&a, &b, &Tolerance::exact()).is_err());
    }

    #[test]
    fn cyclic_values_wrap() {
        let (mut a, mut b) = pair();
        a.row_mut(0)[0] = 255;
        b.row_mut(0)[0] = 1;
        // 255 and 1 are two steps apart on a 256-cycle.
        let mismatch = compare(&a, &b, &Tolerance::cyclic(0, 256)).unwrap_err();
        assert_eq!(mismatch.worst_difference, 2);
    }

    #[test]
    fn value_comparison_reports_delta() {
        assert!(compare_value(10, 10).is_ok());
        let err = compare_value(10, 7).unwrap_err();
        assert_eq!(err.to_string(), "expected 10, got 7 (difference -3)");
    }
}
