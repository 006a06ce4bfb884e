//! This module serves as the public API for the bitmap engine: sequential
//! cursors, bulk bit generation and the range kernels built on them.
//!
//! The engine never owns memory. Every function works on a caller-supplied byte
//! slice plus a `(bit_offset, bit_length)` window; only the allocating kernels
//! draw a fresh buffer from a `MemoryPool`.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// `generate_bits` and its unrolled, byte-identical twin.
pub mod generate;

/// Copy, invert, count, compare and boolean-combine bitmap windows.
pub mod ops;

/// Read-only forward cursor.
pub mod reader;

/// Read-modify-write and write-only forward cursors.
pub mod writer;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use generate::{generate_bits, generate_bits_unrolled, generate_bits_with};
pub use ops::{
    bitmap_and, bitmap_equals, bitmap_or, bitmap_xor, bytes_to_bits, copy_bitmap,
    copy_bitmap_into, count_set_bits, invert_bitmap, invert_bitmap_into,
};
pub use reader::BitmapReader;
pub use writer::{BitmapWriter, FirstTimeBitmapWriter};

//==================================================================================
// 3. Unit Tests (Module-level property tests)
//==================================================================================
