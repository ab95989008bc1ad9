use thiserror::Error;

/// Faults raised by a [`ByteBuf`](crate::ByteBuf) when an access falls outside
/// its indices or capacity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("index {index} with width {width} out of bounds (capacity {capacity})")]
    IndexOutOfBounds {
        index: usize,
        width: usize,
        capacity: usize,
    },

    #[error("reader index {reader_index} + width {width} exceeds writer index {writer_index}")]
    Underflow {
        reader_index: usize,
        width: usize,
        writer_index: usize,
    },

    #[error("writer index {writer_index} + width {width} exceeds max capacity {max_capacity}")]
    CapacityExceeded {
        writer_index: usize,
        width: usize,
        max_capacity: usize,
    },

    #[error("invalid indices: reader {reader_index}, writer {writer_index}, capacity {capacity}")]
    InvalidIndex {
        reader_index: usize,
        writer_index: usize,
        capacity: usize,
    },

    #[error("invalid buffer configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BufferError>;
