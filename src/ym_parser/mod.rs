//! YM File Format Codec
//!
//! Decoding and encoding of uncompressed YM files:
//! - Version markers (YM2! .. YM6!, YM3b, MIX1, YMT1, YMT2; only YM5!/YM6! are supported)
//! - Header codec (fixed fields, skip region, DigiDrum samples, metadata strings)
//! - File codec (header + frame block + `End!` marker)
//!
//! Every multi-byte integer on the wire is big-endian.

pub mod attributes;
pub mod file;
pub mod header;
pub mod text;
pub mod version;

pub use attributes::Attributes;
pub use file::{MetadataEdit, YmFile};
pub use header::{DigiDrum, Header, HeaderSummary};
pub use text::Text;
pub use version::YmVersion;

use crate::{Result, YmError};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

/// Check string following the version marker
pub const CHECK_STRING: &[u8; 8] = b"LeOnArD!";

/// Marker written after the frame block
pub const END_MARKER: &[u8; 4] = b"End!";

/// Bytes per frame (one value for each of the 16 registers)
pub const FRAME_SIZE: usize = 16;

/// Options controlling how strictly a file is decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Require the `End!` marker after the frame data
    pub strict: bool,
}

impl DecodeOptions {
    /// Require the trailing `End!` marker
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Stop reading right after the frame data
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Maps an I/O error from a header read: EOF becomes `TruncatedHeader(field)`.
pub(crate) fn header_eof(field: &'static str) -> impl FnOnce(io::Error) -> YmError {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            YmError::TruncatedHeader(field)
        } else {
            YmError::Io(err)
        }
    }
}

/// Reads up to `len` bytes, stopping early at end of stream.
///
/// Allocation grows with the bytes actually read, so a corrupt length field
/// cannot trigger a huge up-front allocation.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Reads exactly `len` bytes of a header field.
pub(crate) fn read_header_bytes<R: Read>(
    reader: &mut R,
    len: u64,
    field: &'static str,
) -> Result<Vec<u8>> {
    let buf = read_up_to(reader, len)?;
    if (buf.len() as u64) < len {
        return Err(YmError::TruncatedHeader(field));
    }
    Ok(buf)
}
