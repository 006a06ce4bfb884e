//! Sequential bitmap writers.
//!
//! Both writers stage bits in a one-byte accumulator and store it when a byte is
//! complete. They differ in what they assume about the destination:
//!
//! * `BitmapWriter` re-reads every destination byte before staging into it, so bits
//!   on both sides of the written window survive.
//! * `FirstTimeBitmapWriter` only keeps the bits preceding `start_offset` in the
//!   first byte. Everything it stages starts from zero and anything after the window
//!   in the last byte is clobbered. Use it for memory that has not been written yet
//!   or will be overwritten anyway.
//!
//! In both cases the last partial byte only reaches memory in `finish()`.

use crate::bit_util::{BITMASK, PRECEDING_BITMASK};
use crate::traits::impl_bit_writer;

//==================================================================================
// 1. BitmapWriter (read-modify-write)
//==================================================================================

/// A sequential bitwise writer that preserves surrounding bit values.
#[derive(Debug)]
pub struct BitmapWriter<'a> {
    bitmap: &'a mut [u8],
    position: usize,
    length: usize,

    current_byte: u8,
    bit_mask: u8,
    byte_offset: usize,
}

impl<'a> BitmapWriter<'a> {
    pub fn new(bitmap: &'a mut [u8], start_offset: usize, length: usize) -> Self {
        debug_assert!(
            length == 0 || bitmap.len() * 8 >= start_offset + length,
            "BitmapWriter window [{}, {}) exceeds {} bytes",
            start_offset,
            start_offset + length,
            bitmap.len()
        );
        let byte_offset = start_offset / 8;
        let current_byte = if length > 0 { bitmap[byte_offset] } else { 0 };
        Self {
            bitmap,
            position: 0,
            length,
            current_byte,
            bit_mask: BITMASK[start_offset % 8],
            byte_offset,
        }
    }

    #[inline]
    pub fn set(&mut self) {
        self.current_byte |= self.bit_mask;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.current_byte &= self.bit_mask ^ 0xFF;
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.bit_mask <<= 1;
        self.position += 1;
        if self.bit_mask == 0 {
            // Byte complete: store it and seed from the next destination byte.
            self.bit_mask = 0x01;
            self.bitmap[self.byte_offset] = self.current_byte;
            self.byte_offset += 1;
            if self.position < self.length {
                self.current_byte = self.bitmap[self.byte_offset];
            }
        }
    }

    /// Stores the staged byte unless `next()` already stored it on the last boundary.
    #[inline]
    pub fn finish(&mut self) {
        if self.length > 0 && (self.bit_mask != 0x01 || self.position < self.length) {
            self.bitmap[self.byte_offset] = self.current_byte;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl_bit_writer!(BitmapWriter<'_>);

//==================================================================================
// 2. FirstTimeBitmapWriter (write-only)
//==================================================================================

/// Like `BitmapWriter`, but any bit values *following* the bits written might be
/// clobbered. Faster, since full bytes are stored without re-reading memory.
#[derive(Debug)]
pub struct FirstTimeBitmapWriter<'a> {
    bitmap: &'a mut [u8],
    position: usize,
    length: usize,

    current_byte: u8,
    bit_mask: u8,
    byte_offset: usize,
}

impl<'a> FirstTimeBitmapWriter<'a> {
    pub fn new(bitmap: &'a mut [u8], start_offset: usize, length: usize) -> Self {
        debug_assert!(
            length == 0 || bitmap.len() * 8 >= start_offset + length,
            "FirstTimeBitmapWriter window [{}, {}) exceeds {} bytes",
            start_offset,
            start_offset + length,
            bitmap.len()
        );
        let byte_offset = start_offset / 8;
        let current_byte = if length > 0 {
            bitmap[byte_offset] & PRECEDING_BITMASK[start_offset % 8]
        } else {
            0
        };
        Self {
            bitmap,
            position: 0,
            length,
            current_byte,
            bit_mask: BITMASK[start_offset % 8],
            byte_offset,
        }
    }

    #[inline]
    pub fn set(&mut self) {
        self.current_byte |= self.bit_mask;
    }

    /// No-op: the staged bit is already zero.
    #[inline]
    pub fn clear(&mut self) {}

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.bit_mask <<= 1;
        self.position += 1;
        if self.bit_mask == 0 {
            self.bit_mask = 0x01;
            self.bitmap[self.byte_offset] = self.current_byte;
            self.byte_offset += 1;
            self.current_byte = 0;
        }
    }

    #[inline]
    pub fn finish(&mut self) {
        if self.length > 0 && (self.bit_mask != 0x01 || self.position < self.length) {
            self.bitmap[self.byte_offset] = self.current_byte;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl_bit_writer!(FirstTimeBitmapWriter<'_>);

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_util::get_bit;
    use crate::traits::BitWriter;

    fn write_pattern<W: BitWriter>(writer: &mut W, pattern: &[bool]) {
        for &bit in pattern {
            writer.set_to(bit);
            writer.next();
        }
        writer.finish();
    }

    #[test]
    fn test_writer_preserves_both_sides_of_window() {
        let mut buf = [0xFFu8];
        {
            let mut writer = BitmapWriter::new(&mut buf, 3, 4);
            writer.clear();
            writer.next();
            writer.set();
            writer.next();
            writer.clear();
            writer.next();
            writer.set();
            writer.next();
            assert_eq!(writer.position(), 4);
            writer.finish();
        }
        // bit 0 -> bit 7: [1,1,1,0,1,0,1,1]
        assert_eq!(buf[0], 0b1101_0111);
    }

    #[test]
    fn test_first_time_writer_clobbers_trailing_bits() {
        let mut buf = [0xFFu8];
        {
            let mut writer = FirstTimeBitmapWriter::new(&mut buf, 3, 4);
            write_pattern(&mut writer, &[false, true, false, true]);
        }
        // Leading bits 0..3 kept, bit 7 after the window is zeroed.
        assert_eq!(buf[0], 0b0101_0111);
    }

    #[test]
    fn test_writer_across_byte_boundaries() {
        let pattern: Vec<bool> = (0..19).map(|i| i % 3 == 0).collect();
        for offset in 0..8 {
            let mut buf = [0xA5u8; 4];
            let original = buf;
            {
                let mut writer = BitmapWriter::new(&mut buf, offset, pattern.len());
                write_pattern(&mut writer, &pattern);
            }
            for i in 0..32 {
                let expected = if i >= offset && i < offset + pattern.len() {
                    pattern[i - offset]
                } else {
                    get_bit(&original, i)
                };
                assert_eq!(get_bit(&buf, i), expected, "offset {} bit {}", offset, i);
            }
        }
    }

    #[test]
    fn test_first_time_writer_window_contents() {
        let pattern: Vec<bool> = (0..21).map(|i| i % 2 == 1 || i == 4).collect();
        for offset in 0..8 {
            let mut buf = [0xFFu8; 4];
            {
                let mut writer = FirstTimeBitmapWriter::new(&mut buf, offset, pattern.len());
                write_pattern(&mut writer, &pattern);
                assert_eq!(writer.position(), pattern.len());
            }
            for i in 0..offset {
                assert!(get_bit(&buf, i), "leading bit {} lost", i);
            }
            for (i, &bit) in pattern.iter().enumerate() {
                assert_eq!(get_bit(&buf, offset + i), bit);
            }
        }
    }

    #[test]
    fn test_finish_on_exact_byte_end_does_not_overrun() {
        let mut buf = [0u8; 2];
        let mut writer = BitmapWriter::new(&mut buf, 8, 8);
        write_pattern(&mut writer, &[true; 8]);
        assert_eq!(buf, [0x00, 0xFF]);

        let mut buf = [0u8; 1];
        let mut writer = FirstTimeBitmapWriter::new(&mut buf, 0, 8);
        write_pattern(&mut writer, &[true; 8]);
        assert_eq!(buf, [0xFF]);
    }

    #[test]
    fn test_zero_length_writers_flush_nothing() {
        let mut buf = [0x5Au8];
        BitmapWriter::new(&mut buf, 2, 0).finish();
        FirstTimeBitmapWriter::new(&mut buf, 2, 0).finish();
        assert_eq!(buf, [0x5A]);

        let mut empty: [u8; 0] = [];
        BitmapWriter::new(&mut empty, 0, 0).finish();
    }

    #[test]
    fn test_missing_finish_drops_partial_byte() {
        let mut buf = [0u8];
        {
            let mut writer = BitmapWriter::new(&mut buf, 0, 3);
            writer.set();
            writer.next();
            writer.set();
            writer.next();
            // No finish(): staged bits never reach memory.
        }
        assert_eq!(buf, [0]);
    }
}
