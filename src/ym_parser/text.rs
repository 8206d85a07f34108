//! NUL-terminated metadata text
//!
//! YM strings are raw 8-bit text (Atari ST charset in practice), not UTF-8.
//! [`Text`] keeps the exact bytes so that decoding and re-encoding never
//! alters a field, and renders them as Latin-1 for display.

use serde::{Serialize, Serializer};
use std::fmt;
use std::io::{self, Read, Write};

use crate::Result;

/// Raw bytes of a text field, without the terminator
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text(Vec<u8>);

impl Text {
    /// Empty field
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw bytes, cutting at the first NUL
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Self(bytes[..end].to_vec())
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes, terminator excluded
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read one field up to and including its NUL terminator.
    ///
    /// Returns `None` when the stream ends before a terminator.
    pub(crate) fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut bytes = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) if byte[0] == 0 => return Ok(Some(Self(bytes))),
                Ok(_) => bytes.push(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Write the bytes followed by a single NUL.
    pub(crate) fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)?;
        writer.write_all(&[0])
    }
}

impl From<&str> for Text {
    /// Latin-1 encoding: chars above U+00FF become `?`, input stops at NUL.
    fn from(s: &str) -> Self {
        Self(
            s.chars()
                .take_while(|&c| c != '\0')
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        )
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::from(s.as_str())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.0.iter().map(|&b| b as char).collect();
        f.pad(&s)
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
