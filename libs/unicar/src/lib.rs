//! unicar is a Rust library for packing a single file into a minimal CAR v1
//! (Content Addressable aRchive) and computing the CIDs that reference both
//! the wrapped content and the archive itself.
//!
//! The produced archive holds exactly one block: the raw bytes of the input
//! file, framed behind a CBOR header whose single root is the content CID.
//! Both the input and the output are streamed in fixed-size chunks, so files
//! far larger than available memory can be packed.
//!
//! The main philosophy of the library is to stay close to the underlying wire
//! formats: the [wire] module exposes the building blocks (lowercase base32
//! multibase, unsigned LEB128 varints, CIDv1 construction, the CBOR header)
//! and the [write] module drives them into the archive. Codec integers are
//! forwarded untouched, since the valid set is defined by the external
//! multicodec table and keeps evolving.
//!
//! The main entry point is [write_car], which returns the content CID and the
//! archive CID as multibase strings.
//!
//! ## Usages
//!
//! ### Pack a file and print both identifiers
//! ```no_run
//! use std::path::Path;
//!
//! let result = unicar::write_car(
//!     Path::new("photo.jpg"),
//!     Path::new("photo.car"),
//!     0x55, // raw content block
//!     0x70, // codec for the archive CID, tuned to the consuming bridge
//! ).unwrap();
//!
//! println!("content CID: {}", result.content_cid);
//! println!("car CID: {}", result.car_cid);
//! ```
//!
//! ## Alternatives
//!
//! For multi-block archives, DAG traversal or CAR v2 indexes, reach for a full
//! CAR implementation instead:
//! - [rs-car](https://crates.io/crates/rs-car)
//! - [blockless-car](https://crates.io/crates/blockless-car)

pub mod wire;
pub mod write;

pub use write::{CarWriteError, CarWriteResult, write_car};
