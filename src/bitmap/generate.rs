//! Bulk bit generation: a `std::iter::repeat_with`-like writer that fills a
//! bitmap window from a boolean-producing callback.
//!
//! Both variants preserve the bits preceding `start_offset` in the first byte and
//! may clobber the bits following the window in the last byte. They must produce
//! byte-identical output for every input; the unrolled one is simply faster.

use crate::bit_util::{BITMASK, PRECEDING_BITMASK};
use crate::config::GenerationStrategy;

//==================================================================================
// 1. Reference Implementation
//==================================================================================

/// Writes `length` bits produced by `generator` starting at `start_offset`.
///
/// `generator` is called exactly `length` times, in increasing bit order.
pub fn generate_bits<G>(bitmap: &mut [u8], start_offset: usize, length: usize, mut generator: G)
where
    G: FnMut() -> bool,
{
    if length == 0 {
        return;
    }
    let mut cur = start_offset / 8;
    let mut bit_mask = BITMASK[start_offset % 8];
    let mut current_byte = bitmap[cur] & PRECEDING_BITMASK[start_offset % 8];

    for _ in 0..length {
        if generator() {
            current_byte |= bit_mask;
        }
        bit_mask <<= 1;
        if bit_mask == 0 {
            bit_mask = 1;
            bitmap[cur] = current_byte;
            cur += 1;
            current_byte = 0;
        }
    }
    if bit_mask != 1 {
        bitmap[cur] = current_byte;
    }
}

//==================================================================================
// 2. Unrolled Fast Path
//==================================================================================

/// Like `generate_bits`, but the full-byte loop calls the generator eight times
/// per iteration with no mask bookkeeping.
pub fn generate_bits_unrolled<G>(
    bitmap: &mut [u8],
    start_offset: usize,
    length: usize,
    mut generator: G,
) where
    G: FnMut() -> bool,
{
    if length == 0 {
        return;
    }
    let mut cur = start_offset / 8;
    let start_bit_offset = start_offset % 8;
    let mut bit_mask = BITMASK[start_bit_offset];
    let mut remaining = length;

    // Leading partial byte.
    if bit_mask != 0x01 {
        let mut current_byte = bitmap[cur] & PRECEDING_BITMASK[start_bit_offset];
        while bit_mask != 0 && remaining > 0 {
            if generator() {
                current_byte |= bit_mask;
            }
            bit_mask <<= 1;
            remaining -= 1;
        }
        bitmap[cur] = current_byte;
        cur += 1;
    }

    let full_bytes = remaining / 8;
    for out in &mut bitmap[cur..cur + full_bytes] {
        let mut current_byte = 0u8;
        current_byte |= generator() as u8;
        current_byte |= (generator() as u8) << 1;
        current_byte |= (generator() as u8) << 2;
        current_byte |= (generator() as u8) << 3;
        current_byte |= (generator() as u8) << 4;
        current_byte |= (generator() as u8) << 5;
        current_byte |= (generator() as u8) << 6;
        current_byte |= (generator() as u8) << 7;
        *out = current_byte;
    }
    cur += full_bytes;

    // Trailing partial byte.
    let remaining_bits = remaining % 8;
    if remaining_bits > 0 {
        let mut current_byte = 0u8;
        for bit in 0..remaining_bits {
            current_byte |= (generator() as u8) << bit;
        }
        bitmap[cur] = current_byte;
    }
}

/// Dispatches to the configured generator implementation.
pub fn generate_bits_with<G>(
    strategy: GenerationStrategy,
    bitmap: &mut [u8],
    start_offset: usize,
    length: usize,
    generator: G,
) where
    G: FnMut() -> bool,
{
    match strategy {
        GenerationStrategy::Simple => generate_bits(bitmap, start_offset, length, generator),
        GenerationStrategy::Unrolled => {
            generate_bits_unrolled(bitmap, start_offset, length, generator)
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
