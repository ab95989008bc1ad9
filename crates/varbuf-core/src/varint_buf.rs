//! A byte buffer that stores `i32` and `i64` as varints
//!
//! [`VarintBuf`] wraps any [`ByteBuf`] and replaces its integer family
//! (`get`/`set`/`read`/`write` for `i32` and `i64`) with the base-128 varint
//! encoding from [`crate::varint`]. Ints take 1 to 5 bytes, non-negative
//! longs 1 to 9. Every other operation is forwarded untouched, so a
//! `VarintBuf` can stand in wherever a `ByteBuf` is expected. Cursor state
//! lives only in the wrapped buffer.

use log::trace;

use crate::buffer::ByteBuf;
use crate::error::Result;
use crate::heap::HeapBuf;
use crate::varint;

/// Forward `ByteBuf` methods to `self.$field`.
macro_rules! delegate {
    ($field:ident; $(fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(
            fn $name(&self $(, $arg: $ty)*) -> $ret {
                self.$field.$name($($arg),*)
            }
        )*
    };
    ($field:ident; mut $(fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*) -> $ret:ty;)*) => {
        $(
            fn $name(&mut self $(, $arg: $ty)*) -> $ret {
                self.$field.$name($($arg),*)
            }
        )*
    };
}

/// Variable-width integer view over a wrapped buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarintBuf<B: ByteBuf = HeapBuf> {
    inner: B,
}

impl VarintBuf<HeapBuf> {
    /// Wrap a fresh [`HeapBuf`] with the default configuration
    pub fn new() -> Self {
        Self::wrap(HeapBuf::new())
    }
}

impl<B: ByteBuf> VarintBuf<B> {
    /// Wrap `buf`. The wrapper keeps it for its whole lifetime.
    pub fn wrap(buf: B) -> Self {
        trace!(
            "wrapping buffer (capacity {}, reader {}, writer {})",
            buf.capacity(),
            buf.reader_index(),
            buf.writer_index()
        );
        Self { inner: buf }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    pub fn get_u32(&self, index: usize) -> Result<u32> {
        varint::get_u32(&self.inner, index)
    }

    pub fn set_u32(&mut self, index: usize, value: u32) -> Result<()> {
        varint::set_u32(&mut self.inner, index, value).map(|_| ())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        varint::read_u32(&mut self.inner)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        varint::write_u32(&mut self.inner, value).map(|_| ())
    }
}

impl<B: ByteBuf> ByteBuf for VarintBuf<B> {
    delegate! { inner;
        fn capacity(&self) -> usize;
        fn max_capacity(&self) -> usize;
        fn reader_index(&self) -> usize;
        fn writer_index(&self) -> usize;
        fn readable_bytes(&self) -> usize;
        fn writable_bytes(&self) -> usize;
        fn is_readable(&self) -> bool;
        fn to_vec(&self) -> Result<Vec<u8>>;
        fn get_u8(&self, index: usize) -> Result<u8>;
        fn get_bytes(&self, index: usize, dst: &mut [u8]) -> Result<()>;
        fn get_i16(&self, index: usize) -> Result<i16>;
        fn get_f32(&self, index: usize) -> Result<f32>;
        fn get_f64(&self, index: usize) -> Result<f64>;
    }

    delegate! { inner; mut
        fn set_reader_index(&mut self, index: usize) -> Result<()>;
        fn set_writer_index(&mut self, index: usize) -> Result<()>;
        fn ensure_writable(&mut self, min_writable: usize) -> Result<()>;
        fn skip_bytes(&mut self, len: usize) -> Result<()>;
        fn set_u8(&mut self, index: usize, value: u8) -> Result<()>;
        fn read_u8(&mut self) -> Result<u8>;
        fn write_u8(&mut self, value: u8) -> Result<()>;
        fn set_bytes(&mut self, index: usize, src: &[u8]) -> Result<()>;
        fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()>;
        fn write_bytes(&mut self, src: &[u8]) -> Result<()>;
        fn set_i16(&mut self, index: usize, value: i16) -> Result<()>;
        fn read_i16(&mut self) -> Result<i16>;
        fn write_i16(&mut self, value: i16) -> Result<()>;
        fn set_f32(&mut self, index: usize, value: f32) -> Result<()>;
        fn read_f32(&mut self) -> Result<f32>;
        fn write_f32(&mut self, value: f32) -> Result<()>;
        fn set_f64(&mut self, index: usize, value: f64) -> Result<()>;
        fn read_f64(&mut self) -> Result<f64>;
        fn write_f64(&mut self, value: f64) -> Result<()>;
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    // Ints are encoded as their unsigned 32-bit pattern, so negative values
    // round-trip in five bytes.

    fn get_i32(&self, index: usize) -> Result<i32> {
        varint::get_u32(&self.inner, index).map(|value| value as i32)
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<()> {
        varint::set_u32(&mut self.inner, index, value as u32).map(|_| ())
    }

    fn read_i32(&mut self) -> Result<i32> {
        varint::read_u32(&mut self.inner).map(|value| value as i32)
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        varint::write_u32(&mut self.inner, value as u32).map(|_| ())
    }

    // Longs must be non-negative. A negative value is a caller bug: debug
    // builds assert, release builds emit the ten-byte two's-complement group.

    fn get_i64(&self, index: usize) -> Result<i64> {
        varint::get_u64(&self.inner, index).map(|value| value as i64)
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<()> {
        debug_assert!(value >= 0, "varint longs must be non-negative, got {}", value);
        varint::set_u64(&mut self.inner, index, value as u64).map(|_| ())
    }

    fn read_i64(&mut self) -> Result<i64> {
        varint::read_u64(&mut self.inner).map(|value| value as i64)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        debug_assert!(value >= 0, "varint longs must be non-negative, got {}", value);
        varint::write_u64(&mut self.inner, value as u64).map(|_| ())
    }
}
