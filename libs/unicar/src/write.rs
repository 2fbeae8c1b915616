//! Streaming single-block CAR v1 writer.
//!
//! Produces a minimal CAR file holding exactly one block: the raw bytes of an
//! input file. The archive layout is
//! `uvarint(header_len) || header || uvarint(cid_len + payload_len) || cid || payload`.
//!
//! The content CID must be embedded in the stream before the payload, but
//! computing it requires consuming the whole input. The writer therefore makes
//! two passes over the input file (digest, then copy), re-opening it for the
//! second pass rather than buffering it, so inputs far larger than available
//! memory work in constant space. The archive CID in turn depends on the
//! complete archive bytes and is only computed after the output is flushed
//! and closed.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::wire::cid::{CidError, RawCid, sha256_of_reader};
use crate::wire::header::{CarHeader, HeaderError};
use crate::wire::varint::UnsignedVarint;

/// Chunk size used when copying the payload into the archive.
const COPY_BUFFER: usize = 8 * 1024;

/// Result of a successful [write_car] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarWriteResult {
    /// Multibase CID of the content block inside the archive.
    pub content_cid: String,
    /// Multibase CID of the archive file itself.
    pub car_cid: String,
    /// Path of the written archive.
    pub output: PathBuf,
}

/// Packs a single file into a minimal CAR v1 archive.
///
/// The input is streamed twice (digest pass, then copy pass) and the output is
/// written once, then re-read to compute the archive CID. Each call owns its
/// handles exclusively; concurrent calls against distinct paths need no
/// coordination.
///
/// `content_codec` and `car_cid_codec` are multicodec content types forwarded
/// as-is into the respective CIDs; matching a consuming ecosystem's
/// expectations (e.g. `0x55` raw, `0x70` dag-pb) is the caller's
/// responsibility.
///
/// ## Returns
/// - `Ok(CarWriteResult)` with the two multibase CIDs and the output path. A
///   complete archive exists at the output path.
/// - `Err(CarWriteError)` otherwise. A partial output file is removed before
///   returning, so the output path must not be trusted unless the call
///   succeeded.
pub fn write_car(
    input: &Path,
    output: &Path,
    content_codec: u64,
    car_cid_codec: u64,
) -> Result<CarWriteResult, CarWriteError> {
    // First pass: digest the content. Opening up-front also surfaces a
    // missing input before any output is created.
    let reader = open_input(input)?;
    let input_len = reader.metadata()?.len();
    let digest = sha256_of_reader(reader)?;
    let content_cid = RawCid::from_sha256_digest(&digest, content_codec)?;
    debug!("Content CID: {}", content_cid);

    write_archive(input, output, &content_cid, input_len)?;

    // The archive CID covers the complete file, so it can only be computed
    // once the output has been flushed and closed.
    let car_digest = sha256_of_reader(File::open(output)?)?;
    let car_cid = RawCid::from_sha256_digest(&car_digest, car_cid_codec)?;
    debug!("CAR CID: {}", car_cid);

    Ok(CarWriteResult {
        content_cid: content_cid.to_multibase(),
        car_cid: car_cid.to_multibase(),
        output: output.to_path_buf(),
    })
}

/// Writes the framed archive: length-prefixed header, then the single section.
///
/// On failure the partial output is removed before returning, so the output
/// path never holds a readable half-written artifact.
fn write_archive(
    input: &Path,
    output: &Path,
    content_cid: &RawCid,
    input_len: u64,
) -> Result<(), CarWriteError> {
    if let Err(err) = try_write_archive(input, output, content_cid, input_len) {
        let _ = std::fs::remove_file(output);
        return Err(err);
    }
    Ok(())
}

fn try_write_archive(
    input: &Path,
    output: &Path,
    content_cid: &RawCid,
    input_len: u64,
) -> Result<(), CarWriteError> {
    let header = CarHeader::new(vec![content_cid.clone()]).to_bytes()?;
    let cid_bytes = content_cid.bytes();

    let mut sink = BufWriter::new(File::create(output)?);
    sink.write_all(&UnsignedVarint(header.len() as u64).encode())?;
    sink.write_all(&header)?;
    // Single section: the length prefix covers the CID bytes plus the payload
    sink.write_all(&UnsignedVarint(cid_bytes.len() as u64 + input_len).encode())?;
    sink.write_all(cid_bytes)?;

    // Second pass over the input, on a fresh handle. The section length is
    // already committed, so an input that changed in between would produce a
    // mis-framed archive; fail instead.
    let copied = copy_payload(open_input(input)?, &mut sink)?;
    if copied != input_len {
        return Err(CarWriteError::InputChanged {
            expected: input_len,
            copied,
        });
    }
    sink.flush()?;
    Ok(())
}

fn open_input(input: &Path) -> Result<File, CarWriteError> {
    File::open(input).map_err(|_| CarWriteError::MissingInput(input.to_path_buf()))
}

fn copy_payload<R: Read, W: Write>(mut reader: R, sink: &mut W) -> io::Result<u64> {
    let mut buf = [0u8; COPY_BUFFER];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n])?;
        copied += n as u64;
    }
    Ok(copied)
}

/// Errors related to writing a CAR archive
#[derive(thiserror::Error, Debug)]
pub enum CarWriteError {
    /// The input file does not exist or cannot be opened for reading
    #[error("Input file missing or unreadable: {0}")]
    MissingInput(PathBuf),

    /// A read, write or flush failed mid-stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input changed length between the digest pass and the copy pass
    #[error("Input changed during write: framed {expected} bytes, copied {copied}")]
    InputChanged { expected: u64, copied: u64 },

    /// CID construction failed
    #[error("Invalid CID: {0}")]
    Cid(#[from] CidError),

    /// Header serialization failed
    #[error("Header serialization failed: {0}")]
    Header(#[from] HeaderError),
}
