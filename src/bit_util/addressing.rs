//! Utilities for reading and writing individual bits by their index in a
//! memory area.
//!
//! Bitmaps are packed least-significant-bit first: bit `i` lives in byte `i >> 3`
//! at position `i & 7`. None of these functions allocate or fail; the caller
//! guarantees `i < bits.len() * 8`.

//==================================================================================
// 1. Static Mask Tables
//==================================================================================

/// Bitmask selecting the k-th bit in a byte.
pub const BITMASK: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// The bitwise complement of `BITMASK`.
pub const FLIPPED_BITMASK: [u8; 8] = [254, 253, 251, 247, 239, 223, 191, 127];

/// Bitmask selecting the k bits preceding position k in a byte.
pub const PRECEDING_BITMASK: [u8; 8] = [0, 1, 3, 7, 15, 31, 63, 127];

/// The bitwise complement of `PRECEDING_BITMASK`: position k and everything after it.
pub const TRAILING_BITMASK: [u8; 8] = [255, 254, 252, 248, 240, 224, 192, 128];

//==================================================================================
// 2. Single-Bit Access
//==================================================================================

/// Returns the bit at global index `i`.
#[inline]
pub fn get_bit(bits: &[u8], i: usize) -> bool {
    (bits[i >> 3] >> (i & 7)) & 1 != 0
}

/// Sets the bit at global index `i` to 1.
#[inline]
pub fn set_bit(bits: &mut [u8], i: usize) {
    bits[i >> 3] |= BITMASK[i & 7];
}

/// Sets the bit at global index `i` to 0.
#[inline]
pub fn clear_bit(bits: &mut [u8], i: usize) {
    bits[i >> 3] &= FLIPPED_BITMASK[i & 7];
}

/// Sets the bit at global index `i` to `value` without a data-dependent branch.
///
/// Uses the "conditionally set or clear bits without branching" trick: `value`
/// is widened to an all-ones or all-zeros byte and merged under the bit's mask.
#[inline]
pub fn set_bit_to(bits: &mut [u8], i: usize, value: bool) {
    let byte = &mut bits[i >> 3];
    let fill = (value as u8).wrapping_neg();
    *byte ^= (fill ^ *byte) & BITMASK[i & 7];
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
