//! CAR archives make use of variable-length integers (varints) for the header
//! and section length prefixes, and CIDs use them internally for the version,
//! codec and multihash fields.
//!
//! This module provides utilities for encoding and decoding unsigned varints
//! according to the CAR specification.
//!
//! Actually, CAR varints follow the [LEB128 encoding scheme](https://en.wikipedia.org/wiki/LEB128),
//! which is a common method for encoding integers in a variable number of bytes.

/// Unsigned variable-length integer (varint) as used in CAR files and CIDs.
///
/// This struct represents an unsigned varint, which can be encoded and decoded using LEB128 encoding.
/// To do so,
/// - Use `UnsignedVarint::encode()` to encode the varint into a vector of bytes.
/// - Use `UnsignedVarint::decode(bytes)` to decode a varint from a slice of bytes, which returns
///   the decoded varint and the number of bytes read.
///
/// The backing integer is a `u64`, wide enough for any file length this crate
/// frames (well beyond the 2^53 lengths a caller could plausibly hand over).
///
/// ## Examples
/// ```
/// use unicar::wire::varint::UnsignedVarint;
///
/// let varint = UnsignedVarint(624485);
/// let encoded = varint.encode();
/// assert_eq!(encoded, vec![0xE5, 0x8E, 0x26]);
///
/// let (decoded, bytes_read) = UnsignedVarint::decode(&encoded).unwrap();
/// assert_eq!(decoded, UnsignedVarint(624485));
/// assert_eq!(bytes_read, encoded.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsignedVarint(
    /// The underlying unsigned integer value of the varint.
    pub u64
);

impl UnsignedVarint {
    /// Encodes the UnsignedVarint into a vector of bytes using LEB128 encoding.
    ///
    /// The low 7 bits of the remaining value are emitted with the continuation
    /// bit (0x80) set on every byte except the last. A value of 0 encodes to a
    /// single zero byte.
    pub fn encode(self) -> Vec<u8> {
        let mut value = self.0;
        let mut bytes = Vec::new();
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80; // Set continuation bit
            }
            bytes.push(byte);
            if value == 0 {
                break;
            }
        }
        bytes
    }

    /// Decodes an UnsignedVarint from a slice of bytes.
    ///
    /// ## Returns
    /// - `Some((UnsignedVarint, bytes_read))` if decoding is successful,
    ///   where `UnsignedVarint` is the decoded varint and `bytes_read` is the number of bytes consumed during decoding.
    /// - `None` if the input bytes do not represent a valid varint (e.g., incomplete varint or overflow).
    pub fn decode(bytes: &[u8]) -> Option<(Self, usize)> {
        let mut result = 0u64;
        let mut shift = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let value = (byte & 0x7F) as u64;
            result |= value << shift;
            if (byte & 0x80) == 0 {
                return Some((UnsignedVarint(result), i + 1));
            }
            shift += 7;
            if shift >= 64 {
                return None; // Overflow
            }
        }
        None // Incomplete varint
    }
}

impl From<u64> for UnsignedVarint {
    fn from(value: u64) -> Self {
        UnsignedVarint(value)
    }
}

impl From<UnsignedVarint> for u64 {
    fn from(varint: UnsignedVarint) -> Self {
        varint.0
    }
}

#[cfg(test)]
mod tests {
    use super::UnsignedVarint;

    #[test]
    fn test_unsigned_varint_encoding() {
        let varint = UnsignedVarint(624485);
        let expected = vec![0xE5, 0x8E, 0x26];
        assert_eq!(varint.encode(), expected);
    }

    #[test]
    fn test_unsigned_varint_zero_is_single_byte() {
        assert_eq!(UnsignedVarint(0).encode(), vec![0x00]);
        let (decoded, bytes_read) = UnsignedVarint::decode(&[0x00]).unwrap();
        assert_eq!(decoded, UnsignedVarint(0));
        assert_eq!(bytes_read, 1);
    }

    #[test]
    fn test_unsigned_varint_encoding_decoding() {
        let varint = vec![0xE5, 0x8E, 0x26];
        let (decoded, bytes_read) = UnsignedVarint::decode(&varint).unwrap();
        assert_eq!(decoded, UnsignedVarint(624485));
        assert_eq!(bytes_read, varint.len());
    }

    #[test]
    fn test_unsigned_varint_round_trip() {
        for i in 0..=65537 {
            let varint = UnsignedVarint(i);
            let encoded = varint.encode();
            let (decoded, bytes_read) = UnsignedVarint::decode(&encoded).unwrap();
            assert_eq!(varint, decoded);
            assert_eq!(bytes_read, encoded.len());
        }
    }

    #[test]
    fn test_unsigned_varint_large_values() {
        // File lengths may exceed 2^53; the u64 backing must carry them intact
        for &i in &[1u64 << 32, (1 << 53) - 1, 1 << 53, (1 << 53) + 17, u64::MAX] {
            let varint = UnsignedVarint(i);
            let encoded = varint.encode();
            let (decoded, bytes_read) = UnsignedVarint::decode(&encoded).unwrap();
            assert_eq!(varint, decoded);
            assert_eq!(bytes_read, encoded.len());
        }
    }

    #[test]
    fn test_unsigned_varint_incomplete_input() {
        // Continuation bit set on the last available byte
        assert_eq!(UnsignedVarint::decode(&[0xE5, 0x8E]), None);
        assert_eq!(UnsignedVarint::decode(&[]), None);
    }
}
