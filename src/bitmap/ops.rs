// In: src/bitmap/ops.rs

//! Range operations over `(data, offset, length)` bitmap windows.
//!
//! The allocating kernels (`copy_bitmap`, `invert_bitmap`, `bitmap_and/or/xor`,
//! `bytes_to_bits`) draw a zeroed buffer from an injected `MemoryPool` and return it
//! frozen as a shared `arrow::buffer::Buffer`; pool exhaustion is their only failure
//! mode. Everything else works on caller-owned memory and cannot fail.
//!
//! Each kernel has a byte-wise fast path for compatible alignments and falls back
//! to the sequential cursors otherwise. Both paths agree bit for bit with the
//! per-bit definition built on `get_bit`.

use arrow::buffer::Buffer;

use crate::bit_util::{bytes_for_bits, get_bit, PRECEDING_BITMASK, TRAILING_BITMASK};
use crate::bitmap::generate::generate_bits_unrolled;
use crate::bitmap::reader::BitmapReader;
use crate::bitmap::writer::{BitmapWriter, FirstTimeBitmapWriter};
use crate::error::BitmapError;
use crate::memory_pool::MemoryPool;
use crate::traits::BitWriter;

//==================================================================================
// 1. Copy & Invert
//==================================================================================

/// Copies `length` bits starting at `offset` into a fresh buffer realigned to
/// offset 0. Padding bits of the last byte are zero.
pub fn copy_bitmap(
    pool: &dyn MemoryPool,
    bitmap: &[u8],
    offset: usize,
    length: usize,
) -> Result<Buffer, BitmapError> {
    let mut out = pool.allocate(bytes_for_bits(length))?;
    transfer_bitmap::<false, false>(bitmap, offset, length, out.as_slice_mut(), 0);
    Ok(out.into())
}

/// Copies `length` bits starting at `offset` into `dest` at `dest_offset`.
///
/// `dest` must hold at least `dest_offset + length` bits. Bits of `dest` outside
/// the written window are preserved.
pub fn copy_bitmap_into(
    bitmap: &[u8],
    offset: usize,
    length: usize,
    dest: &mut [u8],
    dest_offset: usize,
) {
    transfer_bitmap::<false, true>(bitmap, offset, length, dest, dest_offset);
}

/// Like `copy_bitmap`, but every bit is negated.
pub fn invert_bitmap(
    pool: &dyn MemoryPool,
    bitmap: &[u8],
    offset: usize,
    length: usize,
) -> Result<Buffer, BitmapError> {
    let mut out = pool.allocate(bytes_for_bits(length))?;
    transfer_bitmap::<true, false>(bitmap, offset, length, out.as_slice_mut(), 0);
    Ok(out.into())
}

/// Like `copy_bitmap_into`, but every bit is negated.
pub fn invert_bitmap_into(
    bitmap: &[u8],
    offset: usize,
    length: usize,
    dest: &mut [u8],
    dest_offset: usize,
) {
    transfer_bitmap::<true, true>(bitmap, offset, length, dest, dest_offset);
}

/// Shared body of copy and invert.
///
/// With `RESTORE_TRAILING` the bits after the window in the last destination byte
/// keep their previous value, otherwise they are zeroed.
fn transfer_bitmap<const INVERT: bool, const RESTORE_TRAILING: bool>(
    data: &[u8],
    offset: usize,
    length: usize,
    dest: &mut [u8],
    dest_offset: usize,
) {
    if length == 0 {
        return;
    }
    debug_assert!(data.len() * 8 >= offset + length, "source window out of range");
    debug_assert!(dest.len() * 8 >= dest_offset + length, "destination too small");

    let dest = &mut dest[dest_offset / 8..];
    let dest_bit_offset = dest_offset % 8;

    if dest_bit_offset > 0 {
        log::trace!("transfer_bitmap: unaligned destination, bitwise path");
        let mut reader = BitmapReader::new(data, offset, length);
        let mut writer = BitmapWriter::new(dest, dest_bit_offset, length);
        transfer_bits::<INVERT, _>(&mut reader, &mut writer, length);
        return;
    }

    let num_bytes = bytes_for_bits(length);
    let trailing_bits = num_bytes * 8 - length;
    let trail = if RESTORE_TRAILING && trailing_bits > 0 {
        dest[num_bytes - 1]
    } else {
        0
    };

    let src = &data[offset / 8..];
    let bit_offset = offset % 8;
    if bit_offset > 0 {
        // Each output byte is the tail of one source byte plus the head of the next.
        let source_bytes = bytes_for_bits(length + bit_offset);
        let carry_shift = 8 - bit_offset;
        for (i, out) in dest[..num_bytes].iter_mut().enumerate() {
            let mut byte = src[i] >> bit_offset;
            if i + 1 < source_bytes {
                byte |= src[i + 1] << carry_shift;
            }
            *out = if INVERT { !byte } else { byte };
        }
    } else if INVERT {
        for (out, &byte) in dest[..num_bytes].iter_mut().zip(&src[..num_bytes]) {
            *out = !byte;
        }
    } else {
        dest[..num_bytes].copy_from_slice(&src[..num_bytes]);
    }

    if trailing_bits > 0 {
        let valid_bits = 8 - trailing_bits;
        let last = &mut dest[num_bytes - 1];
        *last = (*last & PRECEDING_BITMASK[valid_bits]) | (trail & TRAILING_BITMASK[valid_bits]);
    }
}

fn transfer_bits<const INVERT: bool, W: BitWriter>(
    reader: &mut BitmapReader<'_>,
    writer: &mut W,
    length: usize,
) {
    for _ in 0..length {
        writer.set_to(INVERT ^ reader.is_set());
        reader.next();
        writer.next();
    }
    writer.finish();
}

//==================================================================================
// 2. Counting & Comparison
//==================================================================================

/// Number of set bits in `[bit_offset, bit_offset + length)`.
///
/// The misaligned head and tail are counted bit by bit; the byte-aligned interior
/// is counted with a population count over 64-bit words.
pub fn count_set_bits(data: &[u8], bit_offset: usize, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    let end = bit_offset + length;
    let head_end = bit_offset.next_multiple_of(8).min(end);
    let mut count = (bit_offset..head_end).filter(|&i| get_bit(data, i)).count();

    let full_bytes = (end - head_end) / 8;
    let first_byte = head_end / 8;
    let interior = &data[first_byte..first_byte + full_bytes];
    let mut words = interior.chunks_exact(8);
    for word in &mut words {
        count += bytemuck::pod_read_unaligned::<u64>(word).count_ones() as usize;
    }
    count += words
        .remainder()
        .iter()
        .map(|byte| byte.count_ones() as usize)
        .sum::<usize>();

    let tail_start = head_end + full_bytes * 8;
    count + (tail_start..end).filter(|&i| get_bit(data, i)).count()
}

/// Returns true iff the two windows hold the same `length` bits. The windows may
/// have different byte alignments.
pub fn bitmap_equals(
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
) -> bool {
    if length == 0 {
        return true;
    }
    if left_offset % 8 == 0 && right_offset % 8 == 0 {
        let full_bytes = length / 8;
        let left_start = left_offset / 8;
        let right_start = right_offset / 8;
        if left[left_start..left_start + full_bytes] != right[right_start..right_start + full_bytes]
        {
            return false;
        }
        return (full_bytes * 8..length)
            .all(|i| get_bit(left, left_offset + i) == get_bit(right, right_offset + i));
    }

    let mut left_reader = BitmapReader::new(left, left_offset, length);
    let mut right_reader = BitmapReader::new(right, right_offset, length);
    for _ in 0..length {
        if left_reader.is_set() != right_reader.is_set() {
            return false;
        }
        left_reader.next();
        right_reader.next();
    }
    true
}

//==================================================================================
// 3. Boolean Combinators
//==================================================================================

/// Logical AND of two windows into a fresh buffer holding `out_offset + length` bits.
/// Bits outside `[out_offset, out_offset + length)` are zero.
pub fn bitmap_and(
    pool: &dyn MemoryPool,
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    out_offset: usize,
) -> Result<Buffer, BitmapError> {
    bitmap_op(
        pool,
        left,
        left_offset,
        right,
        right_offset,
        length,
        out_offset,
        |a, b| a & b,
    )
}

/// Logical OR; see `bitmap_and`.
pub fn bitmap_or(
    pool: &dyn MemoryPool,
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    out_offset: usize,
) -> Result<Buffer, BitmapError> {
    bitmap_op(
        pool,
        left,
        left_offset,
        right,
        right_offset,
        length,
        out_offset,
        |a, b| a | b,
    )
}

/// Logical XOR; see `bitmap_and`.
pub fn bitmap_xor(
    pool: &dyn MemoryPool,
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    out_offset: usize,
) -> Result<Buffer, BitmapError> {
    bitmap_op(
        pool,
        left,
        left_offset,
        right,
        right_offset,
        length,
        out_offset,
        |a, b| a ^ b,
    )
}

#[allow(clippy::too_many_arguments)]
fn bitmap_op<F>(
    pool: &dyn MemoryPool,
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    out_offset: usize,
    op: F,
) -> Result<Buffer, BitmapError>
where
    F: Fn(u8, u8) -> u8,
{
    let mut out = pool.allocate(bytes_for_bits(out_offset + length))?;
    if length > 0 {
        let dest = out.as_slice_mut();
        let bit = out_offset % 8;
        if bit == left_offset % 8 && bit == right_offset % 8 {
            aligned_bitmap_op(left, left_offset, right, right_offset, length, dest, out_offset, op);
        } else {
            unaligned_bitmap_op(left, left_offset, right, right_offset, length, dest, out_offset, op);
        }
    }
    Ok(out.into())
}

/// All three windows share the same bit offset within a byte: combine whole bytes,
/// then zero whatever spilled outside the window in the first and last byte.
#[allow(clippy::too_many_arguments)]
fn aligned_bitmap_op<F>(
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    dest: &mut [u8],
    out_offset: usize,
    op: F,
) where
    F: Fn(u8, u8) -> u8,
{
    log::trace!("bitmap_op: aligned bytewise path over {} bits", length);
    let bit = out_offset % 8;
    let num_bytes = bytes_for_bits(length + bit);
    let left = &left[left_offset / 8..left_offset / 8 + num_bytes];
    let right = &right[right_offset / 8..right_offset / 8 + num_bytes];
    let out_start = out_offset / 8;
    let dest = &mut dest[out_start..out_start + num_bytes];

    for ((out, &l), &r) in dest.iter_mut().zip(left).zip(right) {
        *out = op(l, r);
    }
    dest[0] &= TRAILING_BITMASK[bit];
    let end_bit = (out_offset + length) % 8;
    if end_bit != 0 {
        dest[num_bytes - 1] &= PRECEDING_BITMASK[end_bit];
    }
}

/// Misaligned windows: walk all three bit by bit. The destination is freshly
/// zeroed, so the write-only cursor is sufficient.
#[allow(clippy::too_many_arguments)]
fn unaligned_bitmap_op<F>(
    left: &[u8],
    left_offset: usize,
    right: &[u8],
    right_offset: usize,
    length: usize,
    dest: &mut [u8],
    out_offset: usize,
    op: F,
) where
    F: Fn(u8, u8) -> u8,
{
    log::trace!("bitmap_op: unaligned bitwise path over {} bits", length);
    let mut left_reader = BitmapReader::new(left, left_offset, length);
    let mut right_reader = BitmapReader::new(right, right_offset, length);
    let mut writer = FirstTimeBitmapWriter::new(dest, out_offset, length);
    zip_bits(&mut left_reader, &mut right_reader, &mut writer, length, op);
}

fn zip_bits<W, F>(
    left: &mut BitmapReader<'_>,
    right: &mut BitmapReader<'_>,
    writer: &mut W,
    length: usize,
    op: F,
) where
    W: BitWriter,
    F: Fn(u8, u8) -> u8,
{
    for _ in 0..length {
        writer.set_to(op(left.is_set() as u8, right.is_set() as u8) & 1 != 0);
        left.next();
        right.next();
        writer.next();
    }
    writer.finish();
}

//==================================================================================
// 4. Byte-Per-Value Conversion
//==================================================================================

/// Packs one-boolean-per-byte input (non-zero means set) into a fresh bitmap.
pub fn bytes_to_bits(pool: &dyn MemoryPool, bytes: &[u8]) -> Result<Buffer, BitmapError> {
    let mut out = pool.allocate(bytes_for_bits(bytes.len()))?;
    let mut values = bytes.iter();
    generate_bits_unrolled(out.as_slice_mut(), 0, bytes.len(), || {
        values.next().is_some_and(|&b| b != 0)
    });
    Ok(out.into())
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
