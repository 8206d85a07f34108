//! YM5!/YM6! header codec
//!
//! Layout (big-endian):
//! - Marker: 4 bytes
//! - Check string `LeOnArD!`: 8 bytes
//! - Frame count (u32), attributes (u32), DigiDrum count (u16),
//!   master clock (u32), player frame rate (u16), loop frame (u32)
//! - Skip length (u16) followed by that many opaque bytes
//! - DigiDrum samples: `count` × (size u32, data)
//! - Song name, author, comment: NUL-terminated

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;
use std::fmt;
use std::io::{Read, Write};
use tracing::{debug, trace, warn};

use super::{header_eof, read_header_bytes, Attributes, Text, YmVersion, CHECK_STRING};
use crate::{Result, YmError};

/// Size of the fixed part of the header, up to and including the skip length
pub const FIXED_HEADER_SIZE: usize = 34;

/// Atari ST master clock, used for synthetic headers
pub const DEFAULT_MASTER_CLOCK_HZ: u32 = 2_000_000;

/// PAL VBL rate, used for synthetic headers
pub const DEFAULT_PLAYER_FRAME_HZ: u16 = 50;

/// One DigiDrum sample embedded in the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigiDrum {
    /// Raw sample bytes, stored as found in the file
    pub data: Vec<u8>,
}

impl DigiDrum {
    /// Wrap raw sample bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Sample size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Decoded YM header
///
/// The DigiDrum count and skip length are not stored: encoding writes
/// `samples.len()` and `skip_region.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// File marker
    pub version: YmVersion,
    /// Number of 16-byte frames following the header
    pub frame_count: u32,
    /// Song attributes, kept bit for bit
    pub attributes: Attributes,
    /// YM master clock frequency in Hz
    pub master_clock_hz: u32,
    /// Player frame rate in Hz
    pub player_frame_hz: u16,
    /// Frame to loop back to
    pub loop_frame: u32,
    /// Bytes reserved for future extensions, never interpreted
    pub skip_region: Vec<u8>,
    /// DigiDrum samples in file order
    pub samples: Vec<DigiDrum>,
    /// Song name
    pub song_name: Text,
    /// Author
    pub author: Text,
    /// Comment
    pub comment: Text,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: YmVersion::Ym6,
            frame_count: 0,
            attributes: Attributes::INTERLEAVED,
            master_clock_hz: DEFAULT_MASTER_CLOCK_HZ,
            player_frame_hz: DEFAULT_PLAYER_FRAME_HZ,
            loop_frame: 0,
            skip_region: Vec::new(),
            samples: Vec::new(),
            song_name: Text::new(),
            author: Text::new(),
            comment: Text::new(),
        }
    }
}

impl Header {
    /// Decode a header from the start of `reader`.
    ///
    /// The reader is left positioned at the first frame byte.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(header_eof("version marker"))?;
        let version = YmVersion::from_marker(&marker).ok_or(YmError::MalformedMarker(marker))?;
        if !version.is_supported() {
            return Err(YmError::UnsupportedVersion(version));
        }
        debug!(%version, "detected YM marker");

        let mut check = [0u8; 8];
        reader
            .read_exact(&mut check)
            .map_err(header_eof("check string"))?;
        if &check != CHECK_STRING {
            return Err(YmError::InvalidCheckString(check));
        }

        let frame_count = reader
            .read_u32::<BigEndian>()
            .map_err(header_eof("frame count"))?;
        let attributes = reader
            .read_u32::<BigEndian>()
            .map_err(header_eof("attributes"))?;
        let sample_count = reader
            .read_u16::<BigEndian>()
            .map_err(header_eof("DigiDrum count"))?;
        let master_clock_hz = reader
            .read_u32::<BigEndian>()
            .map_err(header_eof("master clock"))?;
        let player_frame_hz = reader
            .read_u16::<BigEndian>()
            .map_err(header_eof("player frame rate"))?;
        let loop_frame = reader
            .read_u32::<BigEndian>()
            .map_err(header_eof("loop frame"))?;

        let skip_len = reader
            .read_u16::<BigEndian>()
            .map_err(header_eof("skip length"))?;
        let skip_region = read_header_bytes(reader, u64::from(skip_len), "skip region")?;

        debug!(
            frame_count,
            attributes, sample_count, master_clock_hz, player_frame_hz, loop_frame, skip_len,
            "decoded fixed header fields"
        );

        let mut samples = Vec::new();
        for index in 0..sample_count {
            let size = reader
                .read_u32::<BigEndian>()
                .map_err(header_eof("DigiDrum size"))?;
            let data = read_header_bytes(reader, u64::from(size), "DigiDrum data")?;
            trace!(index, size, "read DigiDrum sample");
            samples.push(DigiDrum { data });
        }

        // A stream cut inside the metadata leaves the remaining fields empty.
        let mut texts = [Text::new(), Text::new(), Text::new()];
        for (text, field) in texts.iter_mut().zip(["song name", "author", "comment"]) {
            match Text::read_from(reader)? {
                Some(value) => *text = value,
                None => {
                    warn!(field, "metadata ends without terminator, treating as empty");
                    break;
                }
            }
        }
        let [song_name, author, comment] = texts;

        Ok(Self {
            version,
            frame_count,
            attributes: Attributes::from_bits_retain(attributes),
            master_clock_hz,
            player_frame_hz,
            loop_frame,
            skip_region,
            samples,
            song_name,
            author,
            comment,
        })
    }

    /// Decode a header from a byte slice
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = data;
        Self::read_from(&mut cursor)
    }

    /// Encode the header in decode order.
    ///
    /// Nothing is written if a count or length does not fit its field.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.validate()?;

        writer.write_all(self.version.marker())?;
        writer.write_all(CHECK_STRING)?;

        writer.write_u32::<BigEndian>(self.frame_count)?;
        writer.write_u32::<BigEndian>(self.attributes.bits())?;
        writer.write_u16::<BigEndian>(self.samples.len() as u16)?;
        writer.write_u32::<BigEndian>(self.master_clock_hz)?;
        writer.write_u16::<BigEndian>(self.player_frame_hz)?;
        writer.write_u32::<BigEndian>(self.loop_frame)?;

        writer.write_u16::<BigEndian>(self.skip_region.len() as u16)?;
        writer.write_all(&self.skip_region)?;

        for sample in &self.samples {
            writer.write_u32::<BigEndian>(sample.data.len() as u32)?;
            writer.write_all(&sample.data)?;
        }

        self.song_name.write_to(writer)?;
        self.author.write_to(writer)?;
        self.comment.write_to(writer)?;
        Ok(())
    }

    /// Encode the header into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Number of bytes [`Header::write_to`] produces
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_SIZE
            + self.skip_region.len()
            + self.samples.iter().map(|s| 4 + s.size()).sum::<usize>()
            + self.song_name.len()
            + self.author.len()
            + self.comment.len()
            + 3
    }

    /// Song length in seconds at the player frame rate
    pub fn duration_secs(&self) -> Option<f64> {
        (self.player_frame_hz != 0)
            .then(|| f64::from(self.frame_count) / f64::from(self.player_frame_hz))
    }

    /// Serializable view of the header
    pub fn summary(&self) -> HeaderSummary<'_> {
        HeaderSummary {
            version: self.version.as_str(),
            song_name: &self.song_name,
            author: &self.author,
            comment: &self.comment,
            frame_count: self.frame_count,
            loop_frame: self.loop_frame,
            attributes: self.attributes.bits(),
            interleaved: self.attributes.is_interleaved(),
            digidrum_count: self.samples.len(),
            master_clock_hz: self.master_clock_hz,
            player_frame_hz: self.player_frame_hz,
            duration_secs: self.duration_secs(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.version.is_supported() {
            return Err(YmError::UnsupportedVersion(self.version));
        }
        check_fits("DigiDrum count", self.samples.len(), u64::from(u16::MAX))?;
        check_fits("skip region", self.skip_region.len(), u64::from(u16::MAX))?;
        for sample in &self.samples {
            check_fits("DigiDrum size", sample.size(), u64::from(u32::MAX))?;
        }
        Ok(())
    }
}

fn check_fits(field: &'static str, len: usize, max: u64) -> Result<()> {
    let len = len as u64;
    if len > max {
        return Err(YmError::FieldOverflow { field, len, max });
    }
    Ok(())
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Song name       : {}", self.song_name)?;
        writeln!(f, "Author          : {}", self.author)?;
        writeln!(f, "Comment         : {}", self.comment)?;
        writeln!(f, "YM version      : {}", self.version)?;
        writeln!(f, "Number of frames: {}", self.frame_count)?;
        writeln!(f, "Loop frame      : {}", self.loop_frame)?;
        writeln!(f, "Attributes      : {:032b}", self.attributes.bits())?;
        writeln!(f, "Digidrum samples: {}", self.samples.len())?;
        writeln!(f, "Master clock    : {}Hz", self.master_clock_hz)?;
        writeln!(f, "Player frame    : {}Hz", self.player_frame_hz)
    }
}

/// JSON-friendly header summary used by `ymtool info --json`
#[derive(Debug, Serialize)]
pub struct HeaderSummary<'a> {
    /// Marker text
    pub version: &'static str,
    /// Song name
    pub song_name: &'a Text,
    /// Author
    pub author: &'a Text,
    /// Comment
    pub comment: &'a Text,
    /// Number of frames
    pub frame_count: u32,
    /// Loop frame
    pub loop_frame: u32,
    /// Raw attribute word
    pub attributes: u32,
    /// Whether frames are interleaved
    pub interleaved: bool,
    /// Number of DigiDrum samples
    pub digidrum_count: usize,
    /// Master clock in Hz
    pub master_clock_hz: u32,
    /// Player frame rate in Hz
    pub player_frame_hz: u16,
    /// Length in seconds, if the frame rate is non-zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}
