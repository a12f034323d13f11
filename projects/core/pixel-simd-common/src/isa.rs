//! Instruction-set families a per-transform dispatcher can select.

use derive_enum_all_values::AllValues;

/// The kernel variant families, widest first.
///
/// Every transform exposes a `selected_isa(width)` function returning one of
/// these; for a fixed machine and a fixed width the same value is always
/// returned, which the equivalence tests rely on.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AllValues, Hash)]
pub enum Isa {
    /// 256-bit AVX2 integer path, 32 bytes per op.
    Avx2,
    /// 128-bit SSSE3 byte-shuffle path, 16 bytes per op.
    Ssse3,
    /// 128-bit SSE2 integer path, 16 bytes per op.
    Sse2,
    /// Portable scalar reference, one pixel at a time.
    Scalar,
}

impl Isa {
    /// Bytes of 8-bit data one vector op of this family processes.
    #[inline]
    pub fn lanes(&self) -> usize {
        match self {
            Isa::Avx2 => 32,
            Isa::Ssse3 | Isa::Sse2 => 16,
            Isa::Scalar => 1,
        }
    }
}
