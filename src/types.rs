//! This module defines the canonical, type-safe representation of the element
//! types the splitter operates on.

use crate::error::ByteplaneError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, internal representation of a splittable element type.
///
/// This enum replaces a fragile string-based type system, enabling
/// compile-time checks and eliminating an entire class of runtime errors.
/// Only fixed 4- and 8-byte types are representable; that is the full domain
/// of the byte-stream-split layout.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SplitType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl SplitType {
    /// Returns the element width in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Returns `true` if the type is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Parses the canonical string representation of a type.
    pub fn parse_str(s: &str) -> Result<Self, ByteplaneError> {
        match s {
            "Int32" => Ok(Self::Int32),
            "Int64" => Ok(Self::Int64),
            "UInt32" => Ok(Self::UInt32),
            "UInt64" => Ok(Self::UInt64),
            "Float32" => Ok(Self::Float32),
            "Float64" => Ok(Self::Float64),
            other => Err(ByteplaneError::UnsupportedType(other.to_string())),
        }
    }
}

/// Provides the canonical string representation for a `SplitType`.
impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the public contract.
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_all_types() {
        assert_eq!(SplitType::Int32.width(), 4);
        assert_eq!(SplitType::UInt32.width(), 4);
        assert_eq!(SplitType::Float32.width(), 4);
        assert_eq!(SplitType::Int64.width(), 8);
        assert_eq!(SplitType::UInt64.width(), 8);
        assert_eq!(SplitType::Float64.width(), 8);
    }

    #[test]
    fn test_parse_roundtrip() {
        for t in [
            SplitType::Int32,
            SplitType::Int64,
            SplitType::UInt32,
            SplitType::UInt64,
            SplitType::Float32,
            SplitType::Float64,
        ] {
            assert_eq!(SplitType::parse_str(&t.to_string()).unwrap(), t);
        }
    }

    #[test]
    fn test_parse_unsupported() {
        let result = SplitType::parse_str("Utf8");
        assert!(matches!(result, Err(ByteplaneError::UnsupportedType(s)) if s == "Utf8"));
    }
}
