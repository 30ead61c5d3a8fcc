//! The atomic command vocabulary of the network search.
//!
//! A command is one register-file-wide step: either a pairwise group
//! interleave at some granularity, or (on wide registers) one of the two
//! cross-lane self-permutes. The codec's hand-unrolled fast paths are fixed
//! sequences of these commands; the search enumerates sequences of them.

use crate::lane::Granularity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How registers are paired for an interleave step over a file of SIZE
/// registers. Outputs always land at positions (2i, 2i+1).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// Pair registers (2i, 2i+1).
    Next,
    /// Pair registers (i, i + SIZE/2).
    Skip,
}

/// One atomic search step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Interleave {
        gran: Granularity,
        pairing: Pairing,
    },
    /// Cross-lane qword permute q0,q2,q1,q3 applied to every register.
    PermuteQuads,
    /// Per-lane dword shuffle d0,d2,d1,d3 applied to every register.
    ShuffleDwords,
}

impl Command {
    /// Whether the command only exists on 32-byte registers.
    pub fn requires_wide(&self) -> bool {
        match self {
            Command::Interleave { gran, .. } => *gran == Granularity::DQword,
            Command::PermuteQuads | Command::ShuffleDwords => true,
        }
    }
}

const fn unpack(gran: Granularity, pairing: Pairing) -> Command {
    Command::Interleave { gran, pairing }
}

/// The full alphabet for 16-byte registers: unpack at the four group sizes,
/// each with both pairings.
pub const NARROW_ALPHABET: [Command; 8] = [
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Byte, Pairing::Skip),
    unpack(Granularity::Word, Pairing::Next),
    unpack(Granularity::Word, Pairing::Skip),
    unpack(Granularity::Dword, Pairing::Next),
    unpack(Granularity::Dword, Pairing::Skip),
    unpack(Granularity::Qword, Pairing::Next),
    unpack(Granularity::Qword, Pairing::Skip),
];

/// The full alphabet for 32-byte registers: the narrow alphabet's unpacks
/// (acting per 128-bit half), the cross-lane half interleave, and the two
/// self-permutes.
pub const WIDE_ALPHABET: [Command; 12] = [
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Byte, Pairing::Skip),
    unpack(Granularity::Word, Pairing::Next),
    unpack(Granularity::Word, Pairing::Skip),
    unpack(Granularity::Dword, Pairing::Next),
    unpack(Granularity::Dword, Pairing::Skip),
    unpack(Granularity::Qword, Pairing::Next),
    unpack(Granularity::Qword, Pairing::Skip),
    unpack(Granularity::DQword, Pairing::Next),
    unpack(Granularity::DQword, Pairing::Skip),
    Command::PermuteQuads,
    Command::ShuffleDwords,
];

/// Prints commands in the conventional unpack naming, e.g. `unpack8_next`,
/// `unpack128_skip`, `permute64_self`, `shuffle32_self`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Interleave { gran, pairing } => {
                let bits = gran.bytes() * 8;
                let suffix = match pairing {
                    Pairing::Next => "next",
                    Pairing::Skip => "skip",
                };
                write!(f, "unpack{}_{}", bits, suffix)
            }
            Command::PermuteQuads => write!(f, "permute64_self"),
            Command::ShuffleDwords => write!(f, "shuffle32_self"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(NARROW_ALPHABET[0].to_string(), "unpack8_next");
        assert_eq!(NARROW_ALPHABET[7].to_string(), "unpack64_skip");
        assert_eq!(WIDE_ALPHABET[9].to_string(), "unpack128_skip");
        assert_eq!(Command::PermuteQuads.to_string(), "permute64_self");
        assert_eq!(Command::ShuffleDwords.to_string(), "shuffle32_self");
    }

    #[test]
    fn test_wide_requirements() {
        assert!(NARROW_ALPHABET.iter().all(|c| !c.requires_wide()));
        assert_eq!(WIDE_ALPHABET.iter().filter(|c| c.requires_wide()).count(), 4);
    }

    #[test]
    fn test_command_serde_roundtrip() {
        for cmd in WIDE_ALPHABET {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(back, cmd);
        }
    }
}
