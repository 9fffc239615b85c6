/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * (c) ZeroTier, Inc.
 * https://www.zerotier.com/
 */
//! Bounds checked cursors for reading and writing network order (big endian) values.
//!
//! Every operation either succeeds completely and advances the cursor by exactly the
//! number of bytes it consumed or produced, or fails with `OutOfBounds` and leaves both
//! the cursor and the underlying buffer untouched.

use crate::log_event::log;
#[cfg(feature = "logging")]
use crate::log_event::LogEvent;
use crate::result::OutOfBounds;

mod private {
    pub trait Sealed {}
}

/// A fixed width integer that can be encoded as big endian bytes.
/// Implemented for every primitive integer from 8 to 64 bits.
pub trait BigEndian: Copy + private::Sealed {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decode from the first `SIZE` bytes of `buf`.
    /// Panics if `buf` is shorter than `SIZE`.
    fn read_be(buf: &[u8]) -> Self;

    /// Encode into the first `SIZE` bytes of `buf`.
    /// Panics if `buf` is shorter than `SIZE`.
    fn write_be(self, buf: &mut [u8]);
}

// Single byte types are a plain copy, the shift loop below would shift by the full width.
macro_rules! impl_big_endian_byte {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}
        impl BigEndian for $t {
            const SIZE: usize = 1;

            #[inline]
            fn read_be(buf: &[u8]) -> Self {
                buf[0] as $t
            }

            #[inline]
            fn write_be(self, buf: &mut [u8]) {
                buf[0] = self as u8;
            }
        }
    )*};
}

macro_rules! impl_big_endian_int {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}
        impl BigEndian for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn read_be(buf: &[u8]) -> Self {
                // Bytes go through u8 first so they are never sign extended.
                let mut out = buf[0] as $t;
                for b in &buf[1..Self::SIZE] {
                    out <<= 8;
                    out |= *b as $t;
                }
                out
            }

            #[inline]
            fn write_be(self, buf: &mut [u8]) {
                let mut v = self;
                for i in 0..Self::SIZE {
                    buf[Self::SIZE - i - 1] = (v & 0xff) as u8;
                    v >>= 8;
                }
            }
        }
    )*};
}

impl_big_endian_byte!(u8, i8);
impl_big_endian_int!(u16, u32, u64, i16, i32, i64);

/// Decode a big endian integer from the start of `buf`.
/// Panics if `buf` is too short; use `BigEndianReader` for untrusted lengths.
#[inline]
pub fn read_big_endian<T: BigEndian>(buf: &[u8]) -> T {
    T::read_be(buf)
}

/// Encode `value` as big endian into the start of `buf`.
/// Panics if `buf` is too short; use `BigEndianWriter` for untrusted lengths.
#[inline]
pub fn write_big_endian<T: BigEndian>(buf: &mut [u8], value: T) {
    value.write_be(buf)
}

/// Generates the typed accessors of `BigEndianReader`.
///
/// The `_or_zero` forms return 0 when the buffer is exhausted, which cannot be told apart
/// from a decoded 0. They exist for call sites that have already checked `remaining`;
/// anything parsing untrusted input should use the `Result` returning form.
macro_rules! reader_accessors {
    ($($t:ty => $read:ident, $peek:ident, $read_or_zero:ident, $peek_or_zero:ident;)*) => {$(
        #[inline]
        pub fn $read(&mut self) -> Result<$t, OutOfBounds> {
            self.read::<$t>()
        }

        #[inline]
        pub fn $peek(&self) -> Result<$t, OutOfBounds> {
            self.peek::<$t>()
        }

        #[inline]
        pub fn $read_or_zero(&mut self) -> $t {
            self.read::<$t>().unwrap_or(0)
        }

        #[inline]
        pub fn $peek_or_zero(&self) -> $t {
            self.peek::<$t>().unwrap_or(0)
        }
    )*};
}

/// Reads integers in network order while walking forward over a borrowed buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigEndianReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BigEndianReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Point the reader at a new buffer, starting from its first byte.
    pub fn reset(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.pos = 0;
    }

    /// Number of bytes that have not been consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes that have not been consumed yet.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn check(&self, len: usize) -> Result<(), OutOfBounds> {
        let remaining = self.remaining();
        if len > remaining {
            let err = OutOfBounds { requested: len, remaining };
            log!(LogEvent::ReadOutOfBounds(&err));
            Err(err)
        } else {
            Ok(())
        }
    }

    pub fn skip(&mut self, len: usize) -> Result<(), OutOfBounds> {
        self.check(len)?;
        self.pos += len;
        Ok(())
    }

    /// Borrow the next `len` bytes without copying them or advancing.
    pub fn peek_piece(&self, len: usize) -> Result<&'a [u8], OutOfBounds> {
        self.check(len)?;
        Ok(&self.buf[self.pos..self.pos + len])
    }

    /// Borrow the next `len` bytes without copying them.
    pub fn read_piece(&mut self, len: usize) -> Result<&'a [u8], OutOfBounds> {
        let piece = self.peek_piece(len)?;
        self.pos += len;
        Ok(piece)
    }

    /// Copy the next `out.len()` bytes into `out` without advancing.
    pub fn peek_bytes(&self, out: &mut [u8]) -> Result<(), OutOfBounds> {
        out.copy_from_slice(self.peek_piece(out.len())?);
        Ok(())
    }

    /// Copy the next `out.len()` bytes into `out`.
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), OutOfBounds> {
        out.copy_from_slice(self.read_piece(out.len())?);
        Ok(())
    }

    #[inline]
    fn peek<T: BigEndian>(&self) -> Result<T, OutOfBounds> {
        self.check(T::SIZE)?;
        Ok(T::read_be(&self.buf[self.pos..]))
    }

    #[inline]
    fn read<T: BigEndian>(&mut self) -> Result<T, OutOfBounds> {
        let v = self.peek::<T>()?;
        self.pos += T::SIZE;
        Ok(v)
    }

    reader_accessors! {
        u8 => read_u8, peek_u8, read_u8_or_zero, peek_u8_or_zero;
        u16 => read_u16, peek_u16, read_u16_or_zero, peek_u16_or_zero;
        u32 => read_u32, peek_u32, read_u32_or_zero, peek_u32_or_zero;
        u64 => read_u64, peek_u64, read_u64_or_zero, peek_u64_or_zero;
        i8 => read_i8, peek_i8, read_i8_or_zero, peek_i8_or_zero;
        i16 => read_i16, peek_i16, read_i16_or_zero, peek_i16_or_zero;
        i32 => read_i32, peek_i32, read_i32_or_zero, peek_i32_or_zero;
        i64 => read_i64, peek_i64, read_i64_or_zero, peek_i64_or_zero;
    }

    /// An IEEE-754 double stored as the big endian encoding of its bit pattern.
    pub fn read_f64(&mut self) -> Result<f64, OutOfBounds> {
        self.read::<u64>().map(f64::from_bits)
    }

    pub fn peek_f64(&self) -> Result<f64, OutOfBounds> {
        self.peek::<u64>().map(f64::from_bits)
    }
}

/// Writes integers in network order while walking forward over a borrowed buffer.
#[derive(Debug, Default)]
pub struct BigEndianWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BigEndianWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Point the writer at a new buffer, starting from its first byte.
    pub fn reset(&mut self, buf: &'a mut [u8]) {
        self.buf = buf;
        self.pos = 0;
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Everything written (or skipped over) so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    fn reserve(&mut self, len: usize) -> Result<&mut [u8], OutOfBounds> {
        let remaining = self.remaining();
        if len > remaining {
            let err = OutOfBounds { requested: len, remaining };
            log!(LogEvent::WriteOutOfBounds(&err));
            return Err(err);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&mut self.buf[start..start + len])
    }

    /// Advance past `len` bytes, leaving whatever they already contain.
    pub fn skip(&mut self, len: usize) -> Result<(), OutOfBounds> {
        self.reserve(len).map(|_| ())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), OutOfBounds> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }

    #[inline]
    fn write<T: BigEndian>(&mut self, value: T) -> Result<(), OutOfBounds> {
        value.write_be(self.reserve(T::SIZE)?);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_i16(&mut self, value: i16) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), OutOfBounds> {
        self.write(value)
    }

    /// Write the bit pattern of `value` as a big endian u64.
    pub fn write_f64(&mut self, value: f64) -> Result<(), OutOfBounds> {
        self.write(value.to_bits())
    }
}
