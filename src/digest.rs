//! Frame data digest
//!
//! Hashes only the register frames, so two rips of the same song with
//! different metadata produce the same digest.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 of a frame block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDigest([u8; 32]);

impl FrameDigest {
    /// Hash a frame block
    pub fn of(frames: &[u8]) -> Self {
        Self(Sha256::digest(frames).into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for FrameDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
