//! This module defines shared traits used across the bitmap kernels.

use num_traits::PrimInt;

//==================================================================================
// 1. Sequential Bit Writers
//==================================================================================

/// The common shape of the sequential bitmap writers.
///
/// Both `BitmapWriter` and `FirstTimeBitmapWriter` implement this, which lets the
/// range kernels pick the cheaper writer whenever the destination's trailing
/// content is known to be disposable (e.g. a freshly zeroed allocation).
pub trait BitWriter {
    /// Stages a 1 at the current position.
    fn set(&mut self);

    /// Stages a 0 at the current position.
    fn clear(&mut self);

    /// Advances by exactly one bit, flushing the staged byte when it is complete.
    fn next(&mut self);

    /// Flushes a partially advanced last byte. Must be called after the final `next()`.
    fn finish(&mut self);

    /// Number of bits written so far.
    fn position(&self) -> usize;

    /// Stages `value` at the current position.
    #[inline]
    fn set_to(&mut self, value: bool) {
        if value {
            self.set()
        } else {
            self.clear()
        }
    }
}

/// Forwards the `BitWriter` trait to a writer's inherent methods.
macro_rules! impl_bit_writer {
    ($W:ty) => {
        impl $crate::traits::BitWriter for $W {
            #[inline]
            fn set(&mut self) {
                <$W>::set(self)
            }
            #[inline]
            fn clear(&mut self) {
                <$W>::clear(self)
            }
            #[inline]
            fn next(&mut self) {
                <$W>::next(self)
            }
            #[inline]
            fn finish(&mut self) {
                <$W>::finish(self)
            }
            #[inline]
            fn position(&self) -> usize {
                <$W>::position(self)
            }
        }
    };
}
pub(crate) use impl_bit_writer;

//==================================================================================
// 2. Fixed-Width Integers With a Byte Order
//==================================================================================

mod sealed {
    pub trait Sealed {}
}

/// The closed set of integer widths the byte-order helpers accept.
///
/// Sealed: only `i16`, `u16`, `i32`, `u32`, `i64` and `u64` implement it.
pub trait EndianInt: PrimInt + sealed::Sealed {}

macro_rules! impl_endian_int {
    ($($T:ty),*) => {
        $(
            impl sealed::Sealed for $T {}
            impl EndianInt for $T {}
        )*
    };
}

impl_endian_int!(i16, u16, i32, u32, i64, u64);
