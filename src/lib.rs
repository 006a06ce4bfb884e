//! This file is the root of the `tambak_bitmap` Rust crate: the bit-packed
//! boolean bitmap engine underneath tambak's columnar null/validity tracking.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`bit_util`, `bitmap`, etc.)
//! 2.  Re-exporting the stable public surface so callers can write
//!     `tambak_bitmap::count_set_bits` instead of reaching into sub-modules.
//!
//! The engine never owns the bytes it works on. Cursors and range kernels take a
//! caller-supplied byte slice plus a `(bit_offset, bit_length)` window; only the
//! allocating kernels draw memory, from an injected `MemoryPool`.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bit_util;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod logging;
pub mod memory_pool;
pub mod null_handling;
pub mod traits;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bit_util::{clear_bit, get_bit, set_bit, set_bit_to};
pub use bitmap::{
    bitmap_and, bitmap_equals, bitmap_or, bitmap_xor, bytes_to_bits, copy_bitmap,
    copy_bitmap_into, count_set_bits, generate_bits, generate_bits_unrolled, invert_bitmap,
    invert_bitmap_into, BitmapReader, BitmapWriter, FirstTimeBitmapWriter,
};
pub use config::{BitmapConfig, GenerationStrategy};
pub use error::BitmapError;
pub use memory_pool::{default_memory_pool, BudgetedMemoryPool, MemoryPool, SystemMemoryPool};
pub use traits::BitWriter;
