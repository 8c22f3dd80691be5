//! Fallible buffer allocation.
//!
//! Matrices are large enough that a failed allocation is a realistic outcome
//! of the benchmark. The global allocator aborts the process when `vec!`
//! cannot get memory, so matrix buffers are reserved through
//! [`Vec::try_reserve_exact`] and failures surface as
//! [`MatbenchError::AllocationError`](crate::error::MatbenchError).

use std::mem;

use crate::error::{allocation_error, Result};

/// Number of bytes needed for `len` elements of `T`, or an allocation error
/// when the product does not fit in `usize`.
///
/// # Arguments
///
/// * `len` - Number of elements
///
/// # Errors
///
/// Returns `AllocationError` on arithmetic overflow.
pub fn byte_size<T>(len: usize) -> Result<usize> {
    len.checked_mul(mem::size_of::<T>()).ok_or_else(|| {
        allocation_error(
            usize::MAX,
            format!("{len} elements of {} bytes overflow usize", mem::size_of::<T>()),
        )
    })
}

/// Number of elements in a `rows x cols` buffer, checked for overflow.
pub fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        allocation_error(usize::MAX, format!("{rows}x{cols} elements overflow usize"))
    })
}

/// Allocates a vector of `len` copies of `value` without aborting on failure.
///
/// Unlike `vec![value; len]`, the reservation is attempted up front and an
/// out-of-memory condition is reported as an error.
///
/// # Arguments
///
/// * `len` - Number of elements to allocate
/// * `value` - Value every element is initialized with
///
/// # Errors
///
/// Returns `AllocationError` if the byte size overflows or the allocator
/// refuses the reservation.
pub fn try_filled_vec<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let bytes = byte_size::<T>(len)?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| allocation_error(bytes, e.to_string()))?;
    buffer.resize(len, value);

    Ok(buffer)
}
