//! CAR v1 header encoding.
//!
//! The header is a CBOR map `{roots, version}` in which each root is a CBOR
//! tag 42 over the binary CID, prefixed with the multibase identity byte
//! `0x00`. This is the shape the wider CAR tooling (go-car, ipfs-car) parses;
//! the framing around the header (the leading length varint) is written by the
//! [crate::write] module.

use ciborium::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::wire::cid::RawCid;

/// CAR v1 Header structure
///
/// # Fields
/// - `roots`: the root CIDs, declared first so serde emits the canonical
///   DAG-CBOR map key order (`roots` before `version`)
/// - `version`: the version of the CAR format (always 1 here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarHeader {
    roots: Vec<RawLink>,
    version: u64,
}

impl CarHeader {
    /// Creates a new CAR v1 header with the specified root CIDs
    pub fn new(roots: Vec<RawCid>) -> Self {
        let roots = roots.into_iter().map(RawLink::new).collect();
        CarHeader { roots, version: 1 }
    }

    /// Returns the version of the CAR format
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns a reference to the vector of root CIDs
    pub fn roots(&self) -> &[RawLink] {
        &self.roots
    }

    /// Checks if there are no root CIDs in the header
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Serializes the header to its CBOR byte form
    pub fn to_bytes(&self) -> Result<Vec<u8>, HeaderError> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)?;
        Ok(buf)
    }
}

/// A root link as it appears in the CAR header: CBOR tag 42 over the binary
/// CID prefixed with the multibase identity byte `0x00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawLink(RawCid);

impl RawLink {
    /// Wraps a RawCid as a header link
    pub fn new(cid: RawCid) -> Self {
        RawLink(cid)
    }

    /// Returns the linked CID
    pub fn cid(&self) -> &RawCid {
        &self.0
    }
}

impl Serialize for RawLink {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let cid_bytes = self.0.bytes();
        let mut bytes = Vec::with_capacity(cid_bytes.len() + 1);
        bytes.push(0x00); // Multibase identity prefix
        bytes.extend_from_slice(cid_bytes);
        let value = Value::Tag(42, Box::new(Value::Bytes(bytes)));
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawLink {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Value::Tag(42, boxed_value) = value {
            if let Value::Bytes(bytes) = *boxed_value {
                if let Some((&0x00, cid_bytes)) = bytes.split_first() {
                    return Ok(RawLink(RawCid::new(cid_bytes.to_vec())));
                }
            }
        }
        Err(D::Error::custom("Invalid CID link format"))
    }
}

/// Errors related to header serialization
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    /// CBOR serialization failed
    #[error("CBOR serialization failed: {0}")]
    Cbor(#[from] ciborium::ser::Error<std::io::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Header for a single raw-codec root over SHA-256([0x01, 0x02, 0x03])
    const SINGLE_ROOT_HEADER: &str = "a265726f6f747381d82a58250001551220039058c6f2c0cb492c533b0a4d14ef77cc0f78abccced5287d84a1a2011cfb816776657273696f6e01";

    fn sample_cid() -> RawCid {
        RawCid::from_hex("01551220039058c6f2c0cb492c533b0a4d14ef77cc0f78abccced5287d84a1a2011cfb81")
            .unwrap()
    }

    #[test]
    fn test_car_v1_header_serialization() {
        let header = CarHeader::new(vec![sample_cid()]);
        let bytes = header.to_bytes().unwrap();
        assert_eq!(hex::encode(&bytes), SINGLE_ROOT_HEADER);
    }

    #[test]
    fn test_car_v1_header_deserialization() {
        let bytes = hex::decode(SINGLE_ROOT_HEADER).unwrap();
        let header: CarHeader = ciborium::de::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(header.version(), 1);
        assert_eq!(header.roots().len(), 1);
        assert_eq!(header.roots()[0].cid(), &sample_cid());
    }

    #[test]
    fn test_car_v1_header_round_trip() {
        let header = CarHeader::new(vec![sample_cid()]);
        let bytes = header.to_bytes().unwrap();
        let deserialized: CarHeader = ciborium::de::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(deserialized, header);
    }

    #[test]
    fn test_link_requires_identity_prefix() {
        // Tag 42 bytes without the 0x00 identity prefix are not a valid link
        let data = vec![0xD8, 0x2A, 0x45, 0x01, 0x55, 0x02, 0x03, 0x04];
        let result: Result<RawLink, _> = ciborium::de::from_reader(data.as_slice());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_roots() {
        let header = CarHeader::new(vec![]);
        assert!(header.is_empty());
        assert_eq!(header.version(), 1);
    }
}
