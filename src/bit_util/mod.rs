//! Low-level bit utilities: single-bit addressing over caller-owned bytes,
//! integer bit math, and byte-order conversion.
//!
//! Everything in here is pure, allocation-free and infallible. The sequential
//! cursors and range kernels in `crate::bitmap` are built on top of it.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Bit index -> (byte, mask) addressing and the static mask tables.
pub mod addressing;

/// Byte swapping and big/little endian conversion for fixed-width integers.
pub mod endian;

/// Rounding, division and leading-zero helpers on integers.
pub mod math;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use addressing::{
    clear_bit, get_bit, set_bit, set_bit_to, BITMASK, FLIPPED_BITMASK, PRECEDING_BITMASK,
    TRAILING_BITMASK,
};
pub use math::{bytes_for_bits, ceil_div};
