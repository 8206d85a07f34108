//! Song attribute bitfield
//!
//! The header stores a 32-bit attribute word. The codec never interprets it,
//! but the named flags are handy for tooling and for the register view.

use bitflags::bitflags;

bitflags! {
    /// YM5/YM6 song attributes
    ///
    /// Bits without a named flag are kept as-is so that a round trip writes
    /// the original word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u32 {
        /// Frame data is stored register by register (all r0, then all r1, ...)
        const INTERLEAVED = 1;
        /// DigiDrum samples are signed
        const DRUM_SIGNED = 2;
        /// DigiDrum samples are packed 4-bit values
        const DRUM_4BIT = 4;
        /// Time control
        const TIME_CONTROL = 8;
        /// Loop mode
        const LOOP_MODE = 16;
    }
}

impl Attributes {
    /// Whether the frame block is interleaved
    pub fn is_interleaved(self) -> bool {
        self.contains(Attributes::INTERLEAVED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bits_retained() {
        let attrs = Attributes::from_bits_retain(0x8000_0011);
        assert_eq!(attrs.bits(), 0x8000_0011);
        assert!(attrs.is_interleaved());
        assert!(attrs.contains(Attributes::LOOP_MODE));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(!Attributes::default().is_interleaved());
        assert_eq!(Attributes::default().bits(), 0);
    }
}
