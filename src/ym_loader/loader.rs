//! YM File Loader
//!
//! Reads YM files from disk and writes edited files back atomically.
//! Packed files are detected but never decompressed.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::ym_parser::{DecodeOptions, YmFile, YmVersion};
use crate::{Result, YmError};

/// Search limit for the LHA method signature (level 0-2 headers)
const LHA_SEARCH_LIMIT: usize = 40;

/// Length of the `-lh?-` method signature
const LHA_SIGNATURE_LENGTH: usize = 5;

/// Loads and saves YM files on disk
pub struct YmFileLoader;

impl YmFileLoader {
    /// Read and decode a YM file
    pub fn load(path: &Path, options: DecodeOptions) -> Result<YmFile> {
        let data = fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "loaded YM file");
        Self::load_from_bytes(&data, options)
    }

    /// Decode an in-memory YM file, rejecting LHA archives
    pub fn load_from_bytes(data: &[u8], options: DecodeOptions) -> Result<YmFile> {
        if is_lha_compressed(data) {
            return Err(YmError::Compressed);
        }
        YmFile::from_bytes(data, options)
    }

    /// Encode `file` and replace `path` with it.
    ///
    /// Data goes to a temporary file in the same directory first, so `path`
    /// is either the old file or the complete new one.
    pub fn save(path: &Path, file: &YmFile) -> Result<()> {
        let bytes = file.to_bytes()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| YmError::Io(e.error))?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved YM file");
        Ok(())
    }
}

/// Detect an LHA/LZH archive by its `-lh?-` method signature.
///
/// Data starting with a YM marker is never treated as an archive.
pub fn is_lha_compressed(data: &[u8]) -> bool {
    if let Some(marker) = data.get(..4).and_then(|m| <&[u8; 4]>::try_from(m).ok()) {
        if YmVersion::from_marker(marker).is_some() {
            return false;
        }
    }
    if data.len() < LHA_SIGNATURE_LENGTH + 2 {
        return false;
    }

    let search_limit = LHA_SEARCH_LIMIT.min(data.len() - LHA_SIGNATURE_LENGTH);
    (1..=search_limit).any(|i| match &data[i..i + LHA_SIGNATURE_LENGTH] {
        [b'-', b'l', b'h', level, b'-'] => (b'0'..=b'7').contains(level),
        _ => false,
    })
}
