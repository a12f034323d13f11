//! Helpers for CPU feature detection without using std.
//!
//! Each query probes the hardware exactly once per process and is O(1)
//! afterwards; the result never changes for the process lifetime. On targets
//! where a family cannot exist the query returns `false` rather than failing,
//! so callers treat `false` as "variant unavailable".
//!
//! With the `no-runtime-cpu-detection` feature the queries collapse to
//! compile-time `cfg!(target_feature = ...)` checks, which doubles as the
//! capability override for benchmarking fixed instruction sets.

/// Returns whether 128-bit SSE2 integer instructions are usable.
#[inline]
pub fn has_sse2() -> bool {
    imp::has_sse2()
}

/// Returns whether SSSE3 byte-shuffle instructions are usable.
#[inline]
pub fn has_ssse3() -> bool {
    imp::has_ssse3()
}

/// Returns whether 256-bit AVX2 integer instructions are usable.
#[inline]
pub fn has_avx2() -> bool {
    imp::has_avx2()
}

#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    not(feature = "no-runtime-cpu-detection")
))]
mod imp {
    #[inline]
    pub(super) fn has_sse2() -> bool {
        cpufeatures::new!(cpuid_sse2, "sse2");
        cpuid_sse2::get()
    }

    #[inline]
    pub(super) fn has_ssse3() -> bool {
        cpufeatures::new!(cpuid_ssse3, "ssse3");
        cpuid_ssse3::get()
    }

    #[inline]
    pub(super) fn has_avx2() -> bool {
        cpufeatures::new!(cpuid_avx2, "avx2");
        cpuid_avx2::get()
    }
}

#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    feature = "no-runtime-cpu-detection"
))]
mod imp {
    #[inline]
    pub(super) fn has_sse2() -> bool {
        cfg!(target_feature = "sse2")
    }

    #[inline]
    pub(super) fn has_ssse3() -> bool {
        cfg!(target_feature = "ssse3")
    }

    #[inline]
    pub(super) fn has_avx2() -> bool {
        cfg!(target_feature = "avx2")
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
mod imp {
    #[inline]
    pub(super) fn has_sse2() -> bool {
        false
    }

    #[inline]
    pub(super) fn has_ssse3() -> bool {
        false
    }

    #[inline]
    pub(super) fn has_avx2() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_are_stable_across_calls() {
        for _ in 0..100 {
            assert_eq!(has_sse2(), has_sse2());
            assert_eq!(has_ssse3(), has_ssse3());
            assert_eq!(has_avx2(), has_avx2());
        }
    }

    #[test]
    fn avx2_implies_the_narrower_families() {
        // The preference ladder relies on narrower families being present
        // whenever a wider one is.
        if has_avx2() {
            assert!(has_ssse3());
            assert!(has_sse2());
        }
    }
}
