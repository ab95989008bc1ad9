//! Growable heap buffer backed by a `Vec<u8>`

use log::{debug, trace};

use crate::buffer::ByteBuf;
use crate::config::BufConfig;
use crate::error::{BufferError, Result};

/// Capacities above this grow linearly instead of doubling.
const CAPACITY_THRESHOLD: usize = 4 * 1024 * 1024;

/// Growable byte buffer with independent reader and writer indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapBuf {
    data: Vec<u8>,
    reader_index: usize,
    writer_index: usize,
    max_capacity: usize,
}

impl HeapBuf {
    /// Create an empty buffer with the default configuration
    pub fn new() -> Self {
        let config = BufConfig::default();
        Self::from_parts(config.initial_capacity, config.max_capacity)
    }

    /// Create an empty buffer with custom capacities
    pub fn with_capacity(initial_capacity: usize, max_capacity: usize) -> Result<Self> {
        Self::with_config(&BufConfig::new(initial_capacity, max_capacity))
    }

    pub fn with_config(config: &BufConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.initial_capacity, config.max_capacity))
    }

    /// Wrap existing bytes; all of them are readable.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let writer_index = data.len();
        let max_capacity = writer_index.max(BufConfig::default().max_capacity);
        Self {
            data,
            reader_index: 0,
            writer_index,
            max_capacity,
        }
    }

    fn from_parts(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            data: vec![0; initial_capacity],
            reader_index: 0,
            writer_index: 0,
            max_capacity,
        }
    }

    fn check_index(&self, index: usize, width: usize) -> Result<()> {
        match index.checked_add(width) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(BufferError::IndexOutOfBounds {
                index,
                width,
                capacity: self.data.len(),
            }),
        }
    }

    fn check_readable(&self, width: usize) -> Result<()> {
        if width > self.readable_bytes() {
            return Err(BufferError::Underflow {
                reader_index: self.reader_index,
                width,
                writer_index: self.writer_index,
            });
        }
        Ok(())
    }

    fn calculate_new_capacity(&self, min_new_capacity: usize) -> usize {
        if min_new_capacity == CAPACITY_THRESHOLD {
            return CAPACITY_THRESHOLD;
        }

        if min_new_capacity > CAPACITY_THRESHOLD {
            let new_capacity = min_new_capacity / CAPACITY_THRESHOLD * CAPACITY_THRESHOLD;
            return if new_capacity > self.max_capacity.saturating_sub(CAPACITY_THRESHOLD) {
                self.max_capacity
            } else {
                new_capacity + CAPACITY_THRESHOLD
            };
        }

        let mut new_capacity = 64;
        while new_capacity < min_new_capacity {
            new_capacity <<= 1;
        }
        new_capacity.min(self.max_capacity)
    }
}

impl Default for HeapBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteBuf for HeapBuf {
    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    fn reader_index(&self) -> usize {
        self.reader_index
    }

    fn writer_index(&self) -> usize {
        self.writer_index
    }

    fn set_reader_index(&mut self, index: usize) -> Result<()> {
        if index > self.writer_index {
            return Err(BufferError::InvalidIndex {
                reader_index: index,
                writer_index: self.writer_index,
                capacity: self.data.len(),
            });
        }
        self.reader_index = index;
        Ok(())
    }

    fn set_writer_index(&mut self, index: usize) -> Result<()> {
        if index < self.reader_index || index > self.data.len() {
            return Err(BufferError::InvalidIndex {
                reader_index: self.reader_index,
                writer_index: index,
                capacity: self.data.len(),
            });
        }
        self.writer_index = index;
        Ok(())
    }

    fn clear(&mut self) {
        self.reader_index = 0;
        self.writer_index = 0;
    }

    fn ensure_writable(&mut self, min_writable: usize) -> Result<()> {
        if min_writable <= self.writable_bytes() {
            return Ok(());
        }

        if min_writable > self.max_capacity - self.writer_index {
            debug!(
                "refusing to grow buffer past max capacity {} (writer index {}, requested {})",
                self.max_capacity, self.writer_index, min_writable
            );
            return Err(BufferError::CapacityExceeded {
                writer_index: self.writer_index,
                width: min_writable,
                max_capacity: self.max_capacity,
            });
        }

        let new_capacity = self.calculate_new_capacity(self.writer_index + min_writable);
        trace!("growing buffer from {} to {} bytes", self.data.len(), new_capacity);
        self.data.resize(new_capacity, 0);
        Ok(())
    }

    fn get_u8(&self, index: usize) -> Result<u8> {
        self.check_index(index, 1)?;
        Ok(self.data[index])
    }

    fn set_u8(&mut self, index: usize, value: u8) -> Result<()> {
        self.check_index(index, 1)?;
        self.data[index] = value;
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.check_readable(1)?;
        let value = self.data[self.reader_index];
        self.reader_index += 1;
        Ok(value)
    }

    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.ensure_writable(1)?;
        self.data[self.writer_index] = value;
        self.writer_index += 1;
        Ok(())
    }

    fn get_bytes(&self, index: usize, dst: &mut [u8]) -> Result<()> {
        self.check_index(index, dst.len())?;
        dst.copy_from_slice(&self.data[index..index + dst.len()]);
        Ok(())
    }

    fn set_bytes(&mut self, index: usize, src: &[u8]) -> Result<()> {
        self.check_index(index, src.len())?;
        self.data[index..index + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.check_readable(dst.len())?;
        self.get_bytes(self.reader_index, dst)?;
        self.reader_index += dst.len();
        Ok(())
    }

    fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_writable(src.len())?;
        let start = self.writer_index;
        self.data[start..start + src.len()].copy_from_slice(src);
        self.writer_index += src.len();
        Ok(())
    }
}
