//! Byte-swap and endianness conversion for fixed-width integers.
//!
//! The conversions are a single generic function per direction, constrained to
//! the sealed `EndianInt` trait (16, 32 and 64 bit integers, signed or not).

use crate::traits::EndianInt;

/// Reverses the byte order of `value`.
#[inline]
pub fn byte_swap<T: EndianInt>(value: T) -> T {
    value.swap_bytes()
}

/// Writes the bytes of `src` into `dst` in reverse order.
///
/// `dst` and `src` must have the same length; being distinct borrows they can
/// never overlap.
#[inline]
pub fn byte_swap_into(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len(), "byte_swap_into length mismatch");
    for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = *s;
    }
}

/// Converts `value` from native to big-endian byte order.
#[inline]
pub fn to_big_endian<T: EndianInt>(value: T) -> T {
    value.to_be()
}

/// Converts `value` from native to little-endian byte order.
#[inline]
pub fn to_little_endian<T: EndianInt>(value: T) -> T {
    value.to_le()
}

/// Converts a big-endian `value` to native byte order.
#[inline]
pub fn from_big_endian<T: EndianInt>(value: T) -> T {
    T::from_be(value)
}

/// Converts a little-endian `value` to native byte order.
#[inline]
pub fn from_little_endian<T: EndianInt>(value: T) -> T {
    T::from_le(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_swap_widths() {
        assert_eq!(byte_swap(0x1122u16), 0x2211);
        assert_eq!(byte_swap(0x1122_3344u32), 0x4433_2211);
        assert_eq!(byte_swap(0x1122_3344_5566_7788u64), 0x8877_6655_4433_2211);
        assert_eq!(byte_swap(-2i16), -257);
        assert_eq!(byte_swap(byte_swap(-123_456i32)), -123_456);
    }

    #[test]
    fn test_byte_swap_into_arbitrary_length() {
        let src = [1u8, 2, 3, 4, 5];
        let mut dst = [0u8; 5];
        byte_swap_into(&mut dst, &src);
        assert_eq!(dst, [5, 4, 3, 2, 1]);

        let mut empty: [u8; 0] = [];
        byte_swap_into(&mut empty, &[]);
    }

    #[test]
    fn test_endian_conversions_match_byte_layout() {
        let value = 0x0102_0304u32;
        assert_eq!(to_big_endian(value).to_ne_bytes(), [1, 2, 3, 4]);
        assert_eq!(to_little_endian(value).to_ne_bytes(), [4, 3, 2, 1]);
        assert_eq!(from_big_endian(u32::from_ne_bytes([1, 2, 3, 4])), value);
        assert_eq!(from_little_endian(u32::from_ne_bytes([4, 3, 2, 1])), value);

        let signed = -5i64;
        assert_eq!(from_big_endian(to_big_endian(signed)), signed);
        assert_eq!(from_little_endian(to_little_endian(signed)), signed);
    }
}
