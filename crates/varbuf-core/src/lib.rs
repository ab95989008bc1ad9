//! VarBuf Core - variable-width integer storage over byte buffers
//!
//! This library provides a cursor-addressable byte buffer abstraction and a
//! wrapper that stores `i32`/`i64` values as base-128 varints while leaving
//! every other buffer operation unchanged.

pub mod buffer;
pub mod config;
pub mod error;
pub mod heap;
pub mod varint;
pub mod varint_buf;

pub use buffer::ByteBuf;
pub use config::BufConfig;
pub use error::{BufferError, Result};
pub use heap::HeapBuf;
pub use varint_buf::VarintBuf;
