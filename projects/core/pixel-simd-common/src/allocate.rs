//! Memory allocation utilities for image buffers used by tests and benchmarks.
//!
//! Production kernels never allocate; buffers are caller-owned. The harness
//! and benches allocate through [`allocate_align_64`] so that the aligned code
//! paths of the vector kernels are actually exercised.

use core::alloc::{Layout, LayoutError};
use safe_allocator_api::AllocError;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Allocates data with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new(layout)?)
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// An error that occurred while creating a layout for allocation.
    #[error("Invalid layout provided. Likely due to `num_bytes` in `allocate_align_64` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// An error that occurred while allocating memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_aligned() {
        let alloc = allocate_align_64(1024).unwrap();
        assert_eq!(alloc.as_ptr() as usize % 64, 0);
        assert_eq!(alloc.len(), 1024);
    }
}
