//! The general byte buffer contract
//!
//! A buffer owns a contiguous region of `capacity` bytes and two cursors:
//!
//! ```text
//! +-------------------+------------------+------------------+
//! | discardable bytes |  readable bytes  |  writable bytes  |
//! +-------------------+------------------+------------------+
//! 0      <=      reader_index   <=   writer_index    <=    capacity
//! ```
//!
//! `read_*` consume from the reader index, `write_*` append at the writer
//! index, and `get_*`/`set_*` address an absolute index without moving
//! either cursor. Fixed-width accessors are big-endian.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{BufferError, Result};

pub trait ByteBuf {
    fn capacity(&self) -> usize;
    fn max_capacity(&self) -> usize;
    fn reader_index(&self) -> usize;
    fn writer_index(&self) -> usize;
    fn set_reader_index(&mut self, index: usize) -> Result<()>;
    fn set_writer_index(&mut self, index: usize) -> Result<()>;

    /// Reset both cursors to zero. Contents and capacity are left untouched.
    fn clear(&mut self);

    /// Grow the buffer so at least `min_writable` bytes fit after the writer index.
    fn ensure_writable(&mut self, min_writable: usize) -> Result<()>;

    fn get_u8(&self, index: usize) -> Result<u8>;
    fn set_u8(&mut self, index: usize, value: u8) -> Result<()>;
    fn read_u8(&mut self) -> Result<u8>;
    fn write_u8(&mut self, value: u8) -> Result<()>;

    fn get_bytes(&self, index: usize, dst: &mut [u8]) -> Result<()>;
    fn set_bytes(&mut self, index: usize, src: &[u8]) -> Result<()>;
    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()>;
    fn write_bytes(&mut self, src: &[u8]) -> Result<()>;

    fn readable_bytes(&self) -> usize {
        self.writer_index() - self.reader_index()
    }

    fn writable_bytes(&self) -> usize {
        self.capacity() - self.writer_index()
    }

    fn is_readable(&self) -> bool {
        self.readable_bytes() > 0
    }

    fn skip_bytes(&mut self, len: usize) -> Result<()> {
        if len > self.readable_bytes() {
            return Err(BufferError::Underflow {
                reader_index: self.reader_index(),
                width: len,
                writer_index: self.writer_index(),
            });
        }
        self.set_reader_index(self.reader_index() + len)
    }

    /// Copy of the readable region. Does not move the reader index.
    fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = vec![0; self.readable_bytes()];
        self.get_bytes(self.reader_index(), &mut out)?;
        Ok(out)
    }

    fn get_i16(&self, index: usize) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.get_bytes(index, &mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    fn set_i16(&mut self, index: usize, value: i16) -> Result<()> {
        let mut buf = [0u8; 2];
        BigEndian::write_i16(&mut buf, value);
        self.set_bytes(index, &buf)
    }

    fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0u8; 2];
        self.read_bytes(&mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        let mut buf = [0u8; 2];
        BigEndian::write_i16(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn get_i32(&self, index: usize) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.get_bytes(index, &mut buf)?;
        Ok(BigEndian::read_i32(&buf))
    }

    fn set_i32(&mut self, index: usize, value: i32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_i32(&mut buf, value);
        self.set_bytes(index, &buf)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(BigEndian::read_i32(&buf))
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_i32(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn get_i64(&self, index: usize) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.get_bytes(index, &mut buf)?;
        Ok(BigEndian::read_i64(&buf))
    }

    fn set_i64(&mut self, index: usize, value: i64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_i64(&mut buf, value);
        self.set_bytes(index, &buf)
    }

    fn read_i64(&mut self) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(BigEndian::read_i64(&buf))
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_i64(&mut buf, value);
        self.write_bytes(&buf)
    }

    // Floats go through the byte accessors, never through the i32/i64
    // family, so a buffer that re-encodes integers keeps them fixed-width.

    fn get_f32(&self, index: usize) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.get_bytes(index, &mut buf)?;
        Ok(BigEndian::read_f32(&buf))
    }

    fn set_f32(&mut self, index: usize, value: f32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_f32(&mut buf, value);
        self.set_bytes(index, &buf)
    }

    fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(BigEndian::read_f32(&buf))
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_f32(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn get_f64(&self, index: usize) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.get_bytes(index, &mut buf)?;
        Ok(BigEndian::read_f64(&buf))
    }

    fn set_f64(&mut self, index: usize, value: f64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_f64(&mut buf, value);
        self.set_bytes(index, &buf)
    }

    fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(BigEndian::read_f64(&buf))
    }

    fn write_f64(&mut self, value: f64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_f64(&mut buf, value);
        self.write_bytes(&buf)
    }
}
