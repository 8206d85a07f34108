//! YM file codec
//!
//! A file is a [`Header`], `frame_count * 16` bytes of register frames and
//! the `End!` marker. Frame bytes are kept exactly as stored (interleaved or
//! not); [`YmFile::register_frames`] provides a per-frame view.

use std::io::{Read, Write};
use tracing::debug;

use super::{read_up_to, DecodeOptions, Header, Text, END_MARKER, FRAME_SIZE};
use crate::digest::FrameDigest;
use crate::{Result, YmError};

/// Metadata replacement; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataEdit {
    /// New song name
    pub song_name: Option<String>,
    /// New author
    pub author: Option<String>,
    /// New comment
    pub comment: Option<String>,
}

impl MetadataEdit {
    /// Whether the edit changes nothing
    pub fn is_empty(&self) -> bool {
        self.song_name.is_none() && self.author.is_none() && self.comment.is_none()
    }
}

/// A decoded YM file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YmFile {
    header: Header,
    frames: Vec<u8>,
}

impl YmFile {
    /// Build a file from parts; `frames` must hold `frame_count * 16` bytes.
    pub fn new(header: Header, frames: Vec<u8>) -> Result<Self> {
        check_frame_len(&header, &frames)?;
        Ok(Self { header, frames })
    }

    /// Decode a whole file from `reader`.
    pub fn read_from<R: Read>(reader: &mut R, options: DecodeOptions) -> Result<Self> {
        let header = Header::read_from(reader)?;

        let expected = frame_bytes(header.frame_count);
        let frames = read_up_to(reader, expected)?;
        if (frames.len() as u64) < expected {
            return Err(YmError::TruncatedFrameData {
                expected,
                actual: frames.len() as u64,
            });
        }
        debug!(bytes = frames.len(), "read frame data");

        if options.strict {
            let marker = read_up_to(reader, END_MARKER.len() as u64)?;
            if marker != END_MARKER {
                return Err(YmError::MissingEndMarker);
            }
        }

        Ok(Self { header, frames })
    }

    /// Decode a whole file from a byte slice. Trailing bytes are ignored.
    pub fn from_bytes(data: &[u8], options: DecodeOptions) -> Result<Self> {
        let mut cursor = data;
        Self::read_from(&mut cursor, options)
    }

    /// Encode header, frames and `End!` marker.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        check_frame_len(&self.header, &self.frames)?;
        self.header.write_to(writer)?;
        writer.write_all(&self.frames)?;
        writer.write_all(END_MARKER)?;
        Ok(())
    }

    /// Encode into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf =
            Vec::with_capacity(self.header.encoded_len() + self.frames.len() + END_MARKER.len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable header. Changing `frame_count` without matching frames makes
    /// encoding fail with [`YmError::FrameLengthMismatch`].
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Raw frame block
    pub fn frames(&self) -> &[u8] {
        &self.frames
    }

    /// Split into header and frame block
    pub fn into_parts(self) -> (Header, Vec<u8>) {
        (self.header, self.frames)
    }

    /// Replace the metadata fields present in `edit`
    pub fn set_metadata(&mut self, edit: MetadataEdit) {
        if let Some(song_name) = edit.song_name {
            self.header.song_name = Text::from(song_name);
        }
        if let Some(author) = edit.author {
            self.header.author = Text::from(author);
        }
        if let Some(comment) = edit.comment {
            self.header.comment = Text::from(comment);
        }
    }

    /// Digest of the frame block, independent of metadata
    pub fn frame_digest(&self) -> FrameDigest {
        FrameDigest::of(&self.frames)
    }

    /// Song length in seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.header.duration_secs()
    }

    /// Register values per frame, de-interleaved if needed
    pub fn register_frames(&self) -> Vec<[u8; FRAME_SIZE]> {
        let frame_count = self.frames.len() / FRAME_SIZE;
        let mut frames = vec![[0u8; FRAME_SIZE]; frame_count];

        if self.header.attributes.is_interleaved() {
            // All r0s, then all r1s, etc.
            for reg_idx in 0..FRAME_SIZE {
                let column = &self.frames[reg_idx * frame_count..(reg_idx + 1) * frame_count];
                for (frame, &value) in frames.iter_mut().zip(column) {
                    frame[reg_idx] = value;
                }
            }
        } else {
            for (frame, chunk) in frames
                .iter_mut()
                .zip(self.frames.chunks_exact(FRAME_SIZE))
            {
                frame.copy_from_slice(chunk);
            }
        }

        frames
    }
}

fn frame_bytes(frame_count: u32) -> u64 {
    u64::from(frame_count) * FRAME_SIZE as u64
}

fn check_frame_len(header: &Header, frames: &[u8]) -> Result<()> {
    let expected = frame_bytes(header.frame_count);
    if frames.len() as u64 != expected {
        return Err(YmError::FrameLengthMismatch {
            frame_count: header.frame_count,
            expected,
            actual: frames.len() as u64,
        });
    }
    Ok(())
}
