// --- IN: src/null_handling/validity.rs ---

//! Validity-mask helpers for columnar arrays, built on the bitmap engine and
//! interoperating with Arrow's `NullBuffer`.
//!
//! A validity mask is a bitmap where bit `i` is set iff logical element `i` is
//! non-null. These functions are the bridge between raw `(bytes, offset, length)`
//! windows and the `NullBuffer` type the rest of an Arrow pipeline consumes.

use arrow::buffer::{BooleanBuffer, Buffer, NullBuffer};

use crate::bit_util::bytes_for_bits;
use crate::bitmap::{bitmap_and, copy_bitmap, count_set_bits, generate_bits_with};
use crate::config::GenerationStrategy;
use crate::error::BitmapError;
use crate::memory_pool::MemoryPool;

//==================================================================================
// 1. Building & Inspecting Masks
//==================================================================================

/// Packs one `bool` per slot (`true` = valid) into a fresh validity bitmap.
pub fn validity_from_bools(
    pool: &dyn MemoryPool,
    strategy: GenerationStrategy,
    values: &[bool],
) -> Result<Buffer, BitmapError> {
    let mut out = pool.allocate(bytes_for_bits(values.len()))?;
    let mut iter = values.iter().copied();
    generate_bits_with(strategy, out.as_slice_mut(), 0, values.len(), || {
        iter.next().unwrap_or(false)
    });
    Ok(out.into())
}

/// Number of null (unset) slots in the window.
pub fn null_count(validity: &[u8], offset: usize, length: usize) -> usize {
    length - count_set_bits(validity, offset, length)
}

//==================================================================================
// 2. Arrow Interop
//==================================================================================

/// Wraps a bitmap window as an Arrow `NullBuffer` without copying.
///
/// # Errors
/// Returns `BitmapError::BufferTooSmall` if `buffer` holds fewer than
/// `offset + length` bits.
pub fn to_null_buffer(
    buffer: Buffer,
    offset: usize,
    length: usize,
) -> Result<NullBuffer, BitmapError> {
    let available_bits = buffer.len() * 8;
    let required_bits = offset + length;
    if required_bits > available_bits {
        return Err(BitmapError::BufferTooSmall {
            required_bits,
            available_bits,
        });
    }
    Ok(NullBuffer::new(BooleanBuffer::new(buffer, offset, length)))
}

/// Copies `length` slots of `nulls` starting at `offset` into a fresh mask
/// realigned to bit offset 0.
pub fn slice_validity(
    pool: &dyn MemoryPool,
    nulls: &NullBuffer,
    offset: usize,
    length: usize,
) -> Result<NullBuffer, BitmapError> {
    if offset + length > nulls.len() {
        return Err(BitmapError::BufferTooSmall {
            required_bits: offset + length,
            available_bits: nulls.len(),
        });
    }
    let inner = nulls.inner();
    let copy = copy_bitmap(pool, inner.values(), inner.offset() + offset, length)?;
    to_null_buffer(copy, 0, length)
}

/// Null propagation for binary kernels: a slot is valid iff it is valid on both
/// sides. `None` means "no nulls".
pub fn combine_validity(
    pool: &dyn MemoryPool,
    left: Option<&NullBuffer>,
    right: Option<&NullBuffer>,
) -> Result<Option<NullBuffer>, BitmapError> {
    match (left, right) {
        (None, None) => Ok(None),
        (Some(nulls), None) | (None, Some(nulls)) => Ok(Some(nulls.clone())),
        (Some(l), Some(r)) => {
            if l.len() != r.len() {
                return Err(BitmapError::LengthMismatch {
                    left: l.len(),
                    right: r.len(),
                });
            }
            let (l, r) = (l.inner(), r.inner());
            let combined = bitmap_and(pool, l.values(), l.offset(), r.values(), r.offset(), l.len(), 0)?;
            log::debug!(
                "combine_validity: {} slots, {} null after AND",
                l.len(),
                null_count(combined.as_slice(), 0, l.len())
            );
            to_null_buffer(combined, 0, l.len()).map(Some)
        }
    }
}
