pub mod base32;
pub mod cid;
pub mod header;
pub mod varint;
