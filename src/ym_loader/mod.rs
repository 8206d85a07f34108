//! YM File Loader Domain
//!
//! Handles file I/O for YM music files: reading, packed-archive detection
//! and atomic saving.

pub mod loader;

pub use loader::{is_lha_compressed, YmFileLoader};

use crate::ym_parser::{DecodeOptions, YmFile};
use crate::Result;
use std::path::Path;

/// Convenience function to load a YM file from disk
pub fn load_file(path: impl AsRef<Path>, options: DecodeOptions) -> Result<YmFile> {
    YmFileLoader::load(path.as_ref(), options)
}

/// Convenience function to write a YM file to disk, replacing any existing file
pub fn save_file(path: impl AsRef<Path>, file: &YmFile) -> Result<()> {
    YmFileLoader::save(path.as_ref(), file)
}
