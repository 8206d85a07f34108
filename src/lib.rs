//! YM chiptune file codec
//!
//! Reads and writes uncompressed YM5!/YM6! register-dump files byte for byte.
//! A decoded file can be edited (song name, author, comment) and written
//! back without disturbing any other byte, which makes the crate usable as a
//! metadata fixer for large YM collections.
//!
//! # Layout
//! - [`ym_parser`]: header and file codecs, version markers, attributes
//! - [`ym_loader`]: disk I/O with LHA detection and atomic saves
//! - [`digest`]: content digest of the frame block for duplicate detection
//!
//! # Quick start
//! ```no_run
//! use ymtool::{DecodeOptions, MetadataEdit, YmFile};
//!
//! let data = std::fs::read("song.ym").unwrap();
//! let mut file = YmFile::from_bytes(&data, DecodeOptions::strict()).unwrap();
//! println!("{}", file.header());
//!
//! file.set_metadata(MetadataEdit {
//!     author: Some("Jochen Hippel".into()),
//!     ..Default::default()
//! });
//! std::fs::write("song.ym", file.to_bytes().unwrap()).unwrap();
//! ```
//!
//! Packed (LHA/LZH) files are not decompressed; [`ym_loader::load_file`]
//! reports them as [`YmError::Compressed`].

#![warn(missing_docs)]

pub mod digest;
pub mod ym_loader;
pub mod ym_parser;

use ym_parser::YmVersion;

/// Error types for YM codec operations
#[derive(thiserror::Error, Debug)]
pub enum YmError {
    /// The first four bytes are not a known YM marker
    #[error("unable to extract YM marker, got '{}'", .0.escape_ascii())]
    MalformedMarker([u8; 4]),

    /// A known marker whose layout this codec does not handle
    #[error("unsupported YM version: {0}")]
    UnsupportedVersion(YmVersion),

    /// The check string after the marker is not `LeOnArD!`
    #[error("invalid check string: '{}'", .0.escape_ascii())]
    InvalidCheckString([u8; 8]),

    /// The stream ended inside the named header field
    #[error("truncated header: stream ended while reading {0}")]
    TruncatedHeader(&'static str),

    /// Fewer frame bytes than `frame_count * 16`
    #[error("truncated frame data: expected {expected} bytes, got {actual}")]
    TruncatedFrameData {
        /// Bytes required by the header
        expected: u64,
        /// Bytes actually present
        actual: u64,
    },

    /// Strict decode found no `End!` after the frames
    #[error("missing 'End!' marker after frame data")]
    MissingEndMarker,

    /// A field is too large for its width on the wire
    #[error("{field} does not fit in the YM header: {len} exceeds {max}")]
    FieldOverflow {
        /// Name of the offending field
        field: &'static str,
        /// Actual length or count
        len: u64,
        /// Largest encodable value
        max: u64,
    },

    /// Frame block length disagrees with the header's frame count
    #[error("frame data is {actual} bytes but frame count {frame_count} requires {expected}")]
    FrameLengthMismatch {
        /// Frame count declared by the header
        frame_count: u32,
        /// `frame_count * 16`
        expected: u64,
        /// Length of the frame block
        actual: u64,
    },

    /// Input is an LHA archive that must be unpacked first
    #[error("file is LHA-compressed; unpack it before use")]
    Compressed,

    /// IO error from the underlying reader or writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl YmError {
    /// True for [`YmError::UnsupportedVersion`], which callers usually report
    /// separately from corruption.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, YmError::UnsupportedVersion(_))
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, YmError>;

// Public API exports
pub use digest::FrameDigest;
pub use ym_loader::{load_file, save_file};
pub use ym_parser::{
    Attributes, DecodeOptions, DigiDrum, Header, MetadataEdit, Text, YmFile, CHECK_STRING,
    END_MARKER, FRAME_SIZE,
};
