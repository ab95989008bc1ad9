//! Variable-length integer encoding
//!
//! Base-128 varint: 7 payload bits per byte, least-significant group first,
//! with the continuation bit (0x80) set on every byte except the last.
//! Values are always read unsigned; no zig-zag transform is applied.
//!
//! | bytes | upper bound        |
//! |-------|--------------------|
//! | 1     | 2^7 - 1            |
//! | 2     | 2^14 - 1           |
//! | 3     | 2^21 - 1           |
//! | 4     | 2^28 - 1           |
//! | 5     | 2^32 - 1 (u32 max) |
//! | 9     | 2^63 - 1 (i64 max) |
//! | 10    | 2^64 - 1           |
//!
//! The functions here do no bounds checking of their own. Every byte goes
//! through the buffer's single-byte primitives, so a short buffer surfaces as
//! whatever fault the buffer raises, and a group whose continuation bit never
//! clears is read until the buffer runs out.

use crate::buffer::ByteBuf;
use crate::error::Result;

const PAYLOAD_MASK: u8 = 0x7F;
const CONTINUATION_BIT: u8 = 0x80;
const BITS_PER_BYTE: u32 = 7;

/// Longest group produced for a `u32`
pub const MAX_LEN_U32: usize = 5;
/// Longest group produced for a `u64`; non-negative `i64` values need at most 9
pub const MAX_LEN_U64: usize = 10;

/// Number of bytes `value` occupies once encoded
pub fn encoded_len_u32(value: u32) -> usize {
    let bits = u32::BITS - (value | 1).leading_zeros();
    ((bits + BITS_PER_BYTE - 1) / BITS_PER_BYTE) as usize
}

/// Number of bytes `value` occupies once encoded
pub fn encoded_len_u64(value: u64) -> usize {
    let bits = u64::BITS - (value | 1).leading_zeros();
    ((bits + BITS_PER_BYTE - 1) / BITS_PER_BYTE) as usize
}

fn encode_u32(mut value: u32, mut emit: impl FnMut(u8) -> Result<()>) -> Result<usize> {
    let mut written = 1;
    while value & !u32::from(PAYLOAD_MASK) != 0 {
        emit((value as u8 & PAYLOAD_MASK) | CONTINUATION_BIT)?;
        value >>= BITS_PER_BYTE;
        written += 1;
    }
    emit(value as u8)?;
    Ok(written)
}

fn encode_u64(mut value: u64, mut emit: impl FnMut(u8) -> Result<()>) -> Result<usize> {
    let mut written = 1;
    while value & !u64::from(PAYLOAD_MASK) != 0 {
        emit((value as u8 & PAYLOAD_MASK) | CONTINUATION_BIT)?;
        value >>= BITS_PER_BYTE;
        written += 1;
    }
    emit(value as u8)?;
    Ok(written)
}

// Shifts wrap modulo the accumulator width: bits past the top are dropped
// and an overlong group keeps folding in instead of panicking.

fn decode_u32(mut next: impl FnMut() -> Result<u8>) -> Result<u32> {
    let mut byte = next()?;
    let mut value = u32::from(byte & PAYLOAD_MASK);
    let mut shift = BITS_PER_BYTE;
    while byte & CONTINUATION_BIT != 0 {
        byte = next()?;
        value |= u32::from(byte & PAYLOAD_MASK).wrapping_shl(shift);
        shift = shift.wrapping_add(BITS_PER_BYTE);
    }
    Ok(value)
}

fn decode_u64(mut next: impl FnMut() -> Result<u8>) -> Result<u64> {
    let mut byte = next()?;
    let mut value = u64::from(byte & PAYLOAD_MASK);
    let mut shift = BITS_PER_BYTE;
    while byte & CONTINUATION_BIT != 0 {
        byte = next()?;
        value |= u64::from(byte & PAYLOAD_MASK).wrapping_shl(shift);
        shift = shift.wrapping_add(BITS_PER_BYTE);
    }
    Ok(value)
}

/// Append `value` at the writer index. Returns the number of bytes written.
pub fn write_u32<B: ByteBuf + ?Sized>(buf: &mut B, value: u32) -> Result<usize> {
    encode_u32(value, |byte| buf.write_u8(byte))
}

/// Append `value` at the writer index. Returns the number of bytes written.
pub fn write_u64<B: ByteBuf + ?Sized>(buf: &mut B, value: u64) -> Result<usize> {
    encode_u64(value, |byte| buf.write_u8(byte))
}

/// Overwrite the bytes starting at `index` with the encoding of `value`.
/// Returns the number of bytes written.
pub fn set_u32<B: ByteBuf + ?Sized>(buf: &mut B, index: usize, value: u32) -> Result<usize> {
    let mut idx = index;
    encode_u32(value, |byte| {
        buf.set_u8(idx, byte)?;
        idx += 1;
        Ok(())
    })
}

/// Overwrite the bytes starting at `index` with the encoding of `value`.
/// Returns the number of bytes written.
pub fn set_u64<B: ByteBuf + ?Sized>(buf: &mut B, index: usize, value: u64) -> Result<usize> {
    let mut idx = index;
    encode_u64(value, |byte| {
        buf.set_u8(idx, byte)?;
        idx += 1;
        Ok(())
    })
}

pub fn read_u32<B: ByteBuf + ?Sized>(buf: &mut B) -> Result<u32> {
    decode_u32(|| buf.read_u8())
}

pub fn read_u64<B: ByteBuf + ?Sized>(buf: &mut B) -> Result<u64> {
    decode_u64(|| buf.read_u8())
}

pub fn get_u32<B: ByteBuf + ?Sized>(buf: &B, index: usize) -> Result<u32> {
    let mut idx = index;
    decode_u32(|| {
        let byte = buf.get_u8(idx)?;
        idx += 1;
        Ok(byte)
    })
}

pub fn get_u64<B: ByteBuf + ?Sized>(buf: &B, index: usize) -> Result<u64> {
    let mut idx = index;
    decode_u64(|| {
        let byte = buf.get_u8(idx)?;
        idx += 1;
        Ok(byte)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BufferError;
    use crate::heap::HeapBuf;

    fn encode32(value: u32) -> Vec<u8> {
        let mut buf = HeapBuf::new();
        write_u32(&mut buf, value).unwrap();
        buf.to_vec().unwrap()
    }

    fn encode64(value: u64) -> Vec<u8> {
        let mut buf = HeapBuf::new();
        write_u64(&mut buf, value).unwrap();
        buf.to_vec().unwrap()
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode32(0), vec![0x00]);
        assert_eq!(encode32(1), vec![0x01]);
        assert_eq!(encode32(127), vec![0x7F]);
        assert_eq!(encode32(128), vec![0x80, 0x01]);
        assert_eq!(encode32(300), vec![0xAC, 0x02]);
        assert_eq!(encode32(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode32(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(encode64(300), vec![0xAC, 0x02]);
        assert_eq!(
            encode64(i64::MAX as u64),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]
        );
    }

    #[test]
    fn test_byte_count_boundaries_u32() {
        let cases = [
            (0u32, 1usize),
            (127, 1),
            (128, 2),
            (16383, 2),
            (16384, 3),
            (2097151, 3),
            (2097152, 4),
            (268435455, 4),
            (268435456, 5),
            (i32::MAX as u32, 5),
            (u32::MAX, 5),
        ];
        for &(value, len) in &cases {
            let mut buf = HeapBuf::new();
            assert_eq!(write_u32(&mut buf, value).unwrap(), len, "value {}", value);
            assert_eq!(buf.writer_index(), len);
            assert_eq!(encoded_len_u32(value), len);
            assert_eq!(read_u32(&mut buf).unwrap(), value);
            assert_eq!(buf.reader_index(), len);
        }
    }

    #[test]
    fn test_byte_count_boundaries_u64() {
        for len in 1..=9usize {
            let low = if len == 1 { 0 } else { 1u64 << (7 * (len - 1)) };
            let high = (1u64 << (7 * len).min(63)) - 1;
            for value in [low, low + 1, high - 1, high] {
                let mut buf = HeapBuf::new();
                assert_eq!(write_u64(&mut buf, value).unwrap(), len, "value {}", value);
                assert_eq!(encoded_len_u64(value), len);
                assert_eq!(read_u64(&mut buf).unwrap(), value);
            }
        }
        assert_eq!(encoded_len_u64(u64::MAX), MAX_LEN_U64);
        assert_eq!(encode64(u64::MAX).len(), MAX_LEN_U64);
    }

    #[test]
    fn test_high_bits_survive_decode() {
        // Payload bits beyond bit 31 and in the ninth byte
        for value in [1u64 << 32, 1u64 << 56, (1u64 << 56) | 0xFF, 1u64 << 62, i64::MAX as u64] {
            let mut buf = HeapBuf::new();
            write_u64(&mut buf, value).unwrap();
            assert_eq!(get_u64(&buf, 0).unwrap(), value);
            assert_eq!(read_u64(&mut buf).unwrap(), value);
        }
    }

    #[test]
    fn test_continuation_bits() {
        for value in [0u64, 127, 128, 300, 1 << 40, i64::MAX as u64, u64::MAX] {
            let bytes = encode64(value);
            let (last, rest) = bytes.split_last().unwrap();
            assert!(rest.iter().all(|b| b & 0x80 != 0), "value {}", value);
            assert_eq!(last & 0x80, 0, "value {}", value);
        }
    }

    #[test]
    fn test_set_get_at_offset() {
        let mut buf = HeapBuf::with_capacity(32, 32).unwrap();
        buf.set_bytes(0, &[0xEE; 32]).unwrap();

        assert_eq!(set_u32(&mut buf, 10, 300).unwrap(), 2);
        assert_eq!(get_u32(&buf, 10).unwrap(), 300);
        assert_eq!(buf.get_u8(9).unwrap(), 0xEE);
        assert_eq!(buf.get_u8(12).unwrap(), 0xEE);

        assert_eq!(set_u64(&mut buf, 20, i64::MAX as u64).unwrap(), 9);
        assert_eq!(get_u64(&buf, 20).unwrap(), i64::MAX as u64);
        assert_eq!(buf.get_u8(19).unwrap(), 0xEE);
        assert_eq!(buf.get_u8(29).unwrap(), 0xEE);
    }

    #[test]
    fn test_set_past_capacity_faults() {
        let mut buf = HeapBuf::with_capacity(4, 4).unwrap();
        let err = set_u32(&mut buf, 2, u32::MAX).unwrap_err();
        assert_eq!(
            err,
            BufferError::IndexOutOfBounds {
                index: 4,
                width: 1,
                capacity: 4,
            }
        );
    }

    #[test]
    fn test_truncated_group_faults() {
        let mut buf = HeapBuf::from_vec(vec![0x80, 0x80]);
        assert!(matches!(
            read_u32(&mut buf),
            Err(BufferError::Underflow { reader_index: 2, .. })
        ));
    }

    #[test]
    fn test_unterminated_group_reads_until_fault() {
        let mut buf = HeapBuf::from_vec(vec![0xFF; 64]);
        assert!(matches!(
            read_u64(&mut buf),
            Err(BufferError::Underflow { .. })
        ));
        assert_eq!(buf.reader_index(), 64);

        let buf = HeapBuf::from_vec(vec![0xFF; 64]);
        assert!(matches!(
            get_u32(&buf, 0),
            Err(BufferError::IndexOutOfBounds { index: 64, .. })
        ));
    }

    #[test]
    fn test_overlong_group_does_not_panic() {
        let mut bytes = vec![0x81; 12];
        bytes.push(0x00);
        let mut buf = HeapBuf::from_vec(bytes);
        read_u32(&mut buf).unwrap();
        assert!(!buf.is_readable());
    }
}
