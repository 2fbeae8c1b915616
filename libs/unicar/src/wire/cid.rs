//! Minimal CIDv1 construction from a SHA-256 digest.
//!
//! A CID (Content IDentifier) is a self-describing identifier: a CID version,
//! a multicodec naming the content type, and a multihash carrying the digest.
//! This module builds CIDv1 values from raw SHA-256 digests, renders them as
//! multibase base32 strings (the familiar `bafk...` form) and parses them
//! back. It also provides the streaming SHA-256 helper the rest of the crate
//! digests its inputs with.

use std::io::Read;

use sha2::{Digest as _, Sha256};

use crate::wire::base32::{self, Base32Error};
use crate::wire::varint::UnsignedVarint;

/// Multicodec code identifying the SHA2-256 hash function in a multihash.
const SHA2_256_CODE: u64 = 0x12;
/// Digest length SHA2-256 produces, in bytes.
const SHA2_256_LEN: usize = 32;
/// CID version emitted by this crate.
const CID_VERSION: u64 = 1;
/// Multibase prefix character for lowercase base32.
const MULTIBASE_BASE32_LOWER: char = 'b';
/// Chunk size used when streaming a reader through the hash accumulator.
const DIGEST_BUFFER: usize = 8 * 1024;

/// Represents a raw CID (Content Identifier) in byte format
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawCid(Vec<u8>);

impl RawCid {
    /// Creates a new RawCid from its binary representation
    pub fn new(bytes: Vec<u8>) -> Self {
        RawCid(bytes)
    }

    /// Builds a CIDv1 from a raw SHA-256 digest and a multicodec content type.
    ///
    /// The binary layout is `varint(version=1) || varint(codec) || multihash`,
    /// where the multihash is `varint(0x12) || varint(digest_len) || digest`.
    ///
    /// `codec` is forwarded as-is: the set of valid codes is defined by the
    /// external multicodec table and is not validated here.
    ///
    /// ## Returns
    /// - `Ok(RawCid)` for a 32-byte digest
    /// - `Err(CidError::InvalidDigestLength)` for any other length (empty
    ///   included) — the multihash would otherwise claim sha2-256 over bytes
    ///   the hash function cannot have produced
    pub fn from_sha256_digest(digest: &[u8], codec: u64) -> Result<Self, CidError> {
        if digest.len() != SHA2_256_LEN {
            return Err(CidError::InvalidDigestLength(digest.len()));
        }
        let mut bytes = Vec::with_capacity(digest.len() + 16);
        bytes.extend_from_slice(&UnsignedVarint(CID_VERSION).encode());
        bytes.extend_from_slice(&UnsignedVarint(codec).encode());
        bytes.extend_from_slice(&UnsignedVarint(SHA2_256_CODE).encode());
        bytes.extend_from_slice(&UnsignedVarint(digest.len() as u64).encode());
        bytes.extend_from_slice(digest);
        Ok(RawCid(bytes))
    }

    /// Creates a RawCid from a hexadecimal string representation
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex_str)?;
        Ok(RawCid::new(bytes))
    }

    /// Parses a multibase CID string: the `b` prefix followed by the lowercase
    /// base32 encoding of the binary CID.
    pub fn from_multibase(cid: &str) -> Result<Self, CidError> {
        let encoded = cid
            .strip_prefix(MULTIBASE_BASE32_LOWER)
            .ok_or(CidError::MissingMultibasePrefix)?;
        Ok(RawCid(base32::decode_lower(encoded)?))
    }

    /// Renders the CID as a multibase string: `b` followed by the lowercase
    /// base32 encoding of the binary CID. The result never contains uppercase
    /// characters.
    pub fn to_multibase(&self) -> String {
        format!("{}{}", MULTIBASE_BASE32_LOWER, base32::encode_lower(&self.0))
    }

    /// Returns the byte representation of the RawCid
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// CID version, parsed from the leading varint.
    pub fn version(&self) -> Option<u64> {
        UnsignedVarint::decode(&self.0).map(|(version, _)| version.0)
    }

    /// Multicodec content type, parsed from the second varint.
    pub fn codec(&self) -> Option<u64> {
        let (_, version_size) = UnsignedVarint::decode(&self.0)?;
        UnsignedVarint::decode(&self.0[version_size..]).map(|(codec, _)| codec.0)
    }
}

impl std::fmt::Debug for RawCid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawCid({})", hex::encode(&self.0))
    }
}

impl std::fmt::Display for RawCid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_multibase())
    }
}

/// Computes the SHA-256 digest of everything a reader yields.
///
/// The reader is consumed in 8 KiB chunks through a hash accumulator scoped
/// to this call, so memory use stays constant regardless of input size and
/// concurrent invocations never share state.
pub fn sha256_of_reader<R: Read>(mut reader: R) -> std::io::Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; DIGEST_BUFFER];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}

/// Errors related to CID construction and parsing
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CidError {
    /// The digest is empty or not the 32 bytes SHA-256 produces
    #[error("Invalid SHA-256 digest length: {0} bytes")]
    InvalidDigestLength(usize),
    /// The CID string does not carry the `b` multibase prefix
    #[error("Missing multibase prefix 'b'")]
    MissingMultibasePrefix,
    /// The CID string is not valid lowercase base32
    #[error("Invalid base32 encoding: {0}")]
    InvalidEncoding(#[from] Base32Error),
}
