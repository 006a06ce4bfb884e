//! Bit-related computations on integer values: rounding, ceil division and
//! leading-zero counts. Used for sizing bitmap allocations.

/// Returns the ceil of `value / divisor`.
#[inline]
pub fn ceil_div(value: usize, divisor: usize) -> usize {
    value / divisor + usize::from(value % divisor != 0)
}

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub fn bytes_for_bits(bits: usize) -> usize {
    (bits >> 3) + usize::from(bits & 7 != 0)
}

/// Returns the smallest power of two that is `>= n`. A power of two is returned
/// as is; `0` maps to `0`.
#[inline]
pub fn next_power2(n: u64) -> u64 {
    let mut n = n.wrapping_sub(1);
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n |= n >> 32;
    n.wrapping_add(1)
}

#[inline]
pub fn is_multiple_of_8(n: usize) -> bool {
    n & 7 == 0
}

#[inline]
pub fn is_multiple_of_64(n: usize) -> bool {
    n & 63 == 0
}

/// Returns `value` rounded up to the nearest multiple of `factor`.
#[inline]
pub fn round_up(value: usize, factor: usize) -> usize {
    (value + (factor - 1)) / factor * factor
}

/// Returns `value` rounded up to the nearest multiple of `factor`, which must be a
/// power of two. Overflows (in debug builds, panics) if `value > usize::MAX - factor + 1`.
#[inline]
pub fn round_up_to_power_of_2(value: usize, factor: usize) -> usize {
    debug_assert!(factor > 0 && factor.is_power_of_two());
    (value + (factor - 1)) & !(factor - 1)
}

#[inline]
pub fn round_up_to_multiple_of_8(num: usize) -> usize {
    round_up_to_power_of_2(num, 8)
}

#[inline]
pub fn round_up_to_multiple_of_64(num: usize) -> usize {
    round_up_to_power_of_2(num, 64)
}

/// Returns the `num_bits` least-significant bits of `v`.
#[inline]
pub fn trailing_bits(v: u64, num_bits: u32) -> u64 {
    match num_bits {
        0 => 0,
        n if n >= 64 => v,
        n => {
            let shift = 64 - n;
            (v << shift) >> shift
        }
    }
}

/// Integer widths with a leading-zero count. Implemented for `u32` and `u64`.
pub trait CountLeadingZeros: Copy {
    fn count_leading_zeros(self) -> u32;
}

impl CountLeadingZeros for u32 {
    #[inline]
    fn count_leading_zeros(self) -> u32 {
        self.leading_zeros()
    }
}

impl CountLeadingZeros for u64 {
    #[inline]
    fn count_leading_zeros(self) -> u32 {
        self.leading_zeros()
    }
}

/// Counts the leading zeros of `value`; a zero input yields the full bit width.
#[inline]
pub fn count_leading_zeros<T: CountLeadingZeros>(value: T) -> u32 {
    value.count_leading_zeros()
}

/// Minimum number of bits needed to represent `x`.
#[inline]
pub fn num_required_bits(x: u64) -> u32 {
    64 - count_leading_zeros(x)
}

/// Returns `ceil(log2(x))`. `x` must be positive.
#[inline]
pub fn log2(x: u64) -> u32 {
    debug_assert!(x > 0, "log2 of zero is undefined");
    num_required_bits(x - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_div_and_bytes_for_bits() {
        assert_eq!(ceil_div(0, 8), 0);
        assert_eq!(ceil_div(1, 8), 1);
        assert_eq!(ceil_div(16, 8), 2);
        assert_eq!(ceil_div(17, 8), 3);
        for bits in 0..100 {
            assert_eq!(bytes_for_bits(bits), ceil_div(bits, 8));
        }
    }

    #[test]
    fn test_next_power2() {
        assert_eq!(next_power2(0), 0);
        assert_eq!(next_power2(1), 1);
        assert_eq!(next_power2(3), 4);
        assert_eq!(next_power2(64), 64);
        assert_eq!(next_power2(65), 128);
        assert_eq!(next_power2(1 << 40), 1 << 40);
        assert_eq!(next_power2((1 << 40) + 1), 1 << 41);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_up(10, 3), 12);
        assert_eq!(round_up(12, 3), 12);
        assert_eq!(round_up_to_multiple_of_8(0), 0);
        assert_eq!(round_up_to_multiple_of_8(1), 8);
        assert_eq!(round_up_to_multiple_of_8(8), 8);
        assert_eq!(round_up_to_multiple_of_64(65), 128);
        assert!(is_multiple_of_8(24));
        assert!(!is_multiple_of_8(25));
        assert!(is_multiple_of_64(128));
        assert!(!is_multiple_of_64(96));
    }

    #[test]
    fn test_trailing_bits() {
        let v = 0xDEAD_BEEF_u64;
        assert_eq!(trailing_bits(v, 0), 0);
        assert_eq!(trailing_bits(v, 4), 0xF);
        assert_eq!(trailing_bits(v, 16), 0xBEEF);
        assert_eq!(trailing_bits(v, 64), v);
        assert_eq!(trailing_bits(v, 100), v);
    }

    #[test]
    fn test_leading_zeros_and_log2() {
        assert_eq!(count_leading_zeros(0u32), 32);
        assert_eq!(count_leading_zeros(1u32), 31);
        assert_eq!(count_leading_zeros(0u64), 64);
        assert_eq!(count_leading_zeros(u64::MAX), 0);
        assert_eq!(num_required_bits(0), 0);
        assert_eq!(num_required_bits(255), 8);
        assert_eq!(num_required_bits(256), 9);
        assert_eq!(log2(1), 0);
        assert_eq!(log2(2), 1);
        assert_eq!(log2(5), 3);
        assert_eq!(log2(1024), 10);
    }
}
