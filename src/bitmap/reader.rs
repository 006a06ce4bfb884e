//! A read-only, single forward pass over a window of a bitmap.

/// Sequential reader over `length` bits starting at `start_offset`.
///
/// The current byte is cached and only reloaded when `next()` crosses a byte
/// boundary while positions remain, so the reader never touches memory past the
/// last byte of the window. Not `Clone`: construct a fresh reader to restart.
#[derive(Debug)]
pub struct BitmapReader<'a> {
    bitmap: &'a [u8],
    position: usize,
    length: usize,

    current_byte: u8,
    byte_offset: usize,
    bit_offset: usize,
}

impl<'a> BitmapReader<'a> {
    pub fn new(bitmap: &'a [u8], start_offset: usize, length: usize) -> Self {
        debug_assert!(
            length == 0 || bitmap.len() * 8 >= start_offset + length,
            "BitmapReader window [{}, {}) exceeds {} bytes",
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
            byte_offset,
            bit_offset: start_offset % 8,
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.current_byte & (1 << self.bit_offset) != 0
    }

    #[inline]
    pub fn is_not_set(&self) -> bool {
        self.current_byte & (1 << self.bit_offset) == 0
    }

    /// Advances by one bit.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.bit_offset += 1;
        self.position += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_offset += 1;
            if self.position < self.length {
                self.current_byte = self.bitmap[self.byte_offset];
            }
        }
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Declared window length.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
