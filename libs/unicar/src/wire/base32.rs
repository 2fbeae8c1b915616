//! Base32 (RFC 4648) encoding, lowercase and without padding, as used by the
//! `b` multibase that CIDv1 strings are rendered in.
//!
//! Only the lowercase alphabet `a`-`z`, `2`-`7` is implemented; it is the
//! single base this crate needs to produce and consume CID text.

/// The 32-symbol lowercase base32 alphabet.
const ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Encode bytes into a lowercase base32 string (no padding).
///
/// Input bits are consumed most-significant-bit first in 8-bit groups and
/// regrouped into 5-bit symbols. A trailing incomplete group is left-shifted
/// so its low bits are zero before the alphabet lookup. No padding character
/// is ever appended.
///
/// ## Examples
/// ```
/// use unicar::wire::base32::encode_lower;
///
/// assert_eq!(encode_lower(b"foobar"), "mzxw6ytboi");
/// assert_eq!(encode_lower(&[]), "");
/// ```
pub fn encode_lower(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer = 0u16;
    let mut bits_left = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | byte as u16;
        bits_left += 8;
        while bits_left >= 5 {
            let index = (buffer >> (bits_left - 5)) & 0x1F;
            bits_left -= 5;
            output.push(ALPHABET[index as usize] as char);
        }
    }
    if bits_left > 0 {
        let index = (buffer << (5 - bits_left)) & 0x1F;
        output.push(ALPHABET[index as usize] as char);
    }
    output
}

/// Decode a base32 string into bytes.
///
/// Decoding is case-insensitive and surrounding whitespace is ignored. Bits
/// are concatenated in encounter order and regrouped into 8-bit bytes; a
/// trailing group of fewer than 8 bits is encoding padding, not data, and is
/// discarded.
///
/// ## Returns
/// - `Ok(bytes)` with the decoded bytes (empty input yields empty output)
/// - `Err(Base32Error::InvalidCharacter)` if a character outside the alphabet
///   is encountered
pub fn decode_lower(input: &str) -> Result<Vec<u8>, Base32Error> {
    let cleaned = input.trim();
    let mut output = Vec::with_capacity(cleaned.len() * 5 / 8);
    let mut buffer = 0u16;
    let mut bits_left = 0u32;
    for ch in cleaned.chars() {
        let ch = ch.to_ascii_lowercase();
        let value = match ch {
            'a'..='z' => ch as u16 - 'a' as u16,
            '2'..='7' => ch as u16 - '2' as u16 + 26,
            _ => return Err(Base32Error::InvalidCharacter(ch)),
        };
        buffer = (buffer << 5) | value;
        bits_left += 5;
        if bits_left >= 8 {
            bits_left -= 8;
            output.push((buffer >> bits_left) as u8);
        }
    }
    Ok(output)
}

/// Errors related to base32 decoding
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Base32Error {
    /// The input contains a character outside the `a`-`z`, `2`-`7` alphabet
    #[error("Invalid base32 character: {0:?}")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::{Base32Error, decode_lower, encode_lower};

    // RFC 4648 test vectors, lowercased and stripped of padding.
    const RFC4648_VECTORS: [(&[u8], &str); 7] = [
        (b"", ""),
        (b"f", "my"),
        (b"fo", "mzxq"),
        (b"foo", "mzxw6"),
        (b"foob", "mzxw6yq"),
        (b"fooba", "mzxw6ytb"),
        (b"foobar", "mzxw6ytboi"),
    ];

    #[test]
    fn test_encode_rfc4648_vectors() {
        for (input, expected) in RFC4648_VECTORS {
            assert_eq!(encode_lower(input), expected);
        }
    }

    #[test]
    fn test_decode_rfc4648_vectors() {
        for (expected, input) in RFC4648_VECTORS {
            assert_eq!(decode_lower(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_decode_is_case_insensitive_and_trims() {
        assert_eq!(decode_lower("MZXW6YTBOI").unwrap(), b"foobar");
        assert_eq!(decode_lower("  mzxw6ytboi\n").unwrap(), b"foobar");
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(
            decode_lower("mzxw1"),
            Err(Base32Error::InvalidCharacter('1'))
        );
        assert_eq!(
            decode_lower("mzx=w"),
            Err(Base32Error::InvalidCharacter('='))
        );
    }

    #[test]
    fn test_round_trip_all_single_bytes() {
        for b in 0u8..=255 {
            let data = [b];
            assert_eq!(decode_lower(&encode_lower(&data)).unwrap(), data);
        }
    }

    #[test]
    fn test_round_trip_various_lengths() {
        // Lengths crossing every 5-bit group boundary, with non-trivial content
        for len in 0..64usize {
            let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(37).wrapping_add(11)).collect();
            let encoded = encode_lower(&data);
            assert!(encoded.chars().all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c)));
            assert_eq!(decode_lower(&encoded).unwrap(), data);
        }
    }
}
