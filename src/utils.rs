//! This module provides a set of shared, low-level utility functions used
//! throughout the byteplane Rust core.
//!
//! Its primary responsibilities include:
//! 1.  Providing safe, validated conversions between raw byte slices and typed slices.
//! 2.  Keeping all reinterpretation of memory behind `bytemuck`, so no module
//!     in this crate needs a raw pointer cast of its own.

use crate::error::ByteplaneError;

/// Safely reinterprets a byte slice as a slice of a plain-old-data type.
///
/// This function is the primary gateway for converting raw bytes from a
/// caller's buffer into a workable, typed slice. It is a zero-copy view.
///
/// # Errors
/// Returns a `ByteplaneError::PodCast` if the byte slice length is not a
/// multiple of `size_of::<T>()` or the slice is misaligned for `T`.
pub fn safe_bytes_to_typed_slice<T: bytemuck::Pod>(bytes: &[u8]) -> Result<&[T], ByteplaneError> {
    // Bytemuck's error type carries the failure detail (alignment, length).
    bytemuck::try_cast_slice(bytes).map_err(ByteplaneError::from)
}

/// Converts a slice of plain-old-data values into a `Vec<u8>`.
///
/// This performs a memory copy to create a new, owned byte vector holding the
/// elements' in-memory (native-endian) layout.
pub fn typed_slice_to_bytes<T: bytemuck::Pod>(data: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(data).to_vec()
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_bytes_to_typed_slice_success() {
        let original_vec: Vec<i32> = vec![1, -2, 1_000_000];
        let bytes = typed_slice_to_bytes(&original_vec);

        let typed_slice = safe_bytes_to_typed_slice::<i32>(&bytes).unwrap();
        assert_eq!(typed_slice, original_vec.as_slice());
    }

    #[test]
    fn test_safe_bytes_to_typed_slice_mismatch_error() {
        // 5 bytes is not divisible by size_of::<i32>() and may be unaligned.
        // Any error from bytemuck must surface as our PodCast variant.
        let bytes: Vec<u8> = vec![0, 1, 2, 3, 4];

        let result = safe_bytes_to_typed_slice::<i32>(&bytes);
        assert!(matches!(result, Err(ByteplaneError::PodCast(_))));
    }

    #[test]
    fn test_typed_slice_to_bytes_endianness() {
        // Value is 258 = 0x0102 in hex.
        let original_vec: Vec<u16> = vec![258];
        let bytes = typed_slice_to_bytes(&original_vec);

        // bytemuck preserves native layout; the split layout is defined
        // against little-endian storage.
        if cfg!(target_endian = "little") {
            assert_eq!(bytes, vec![0x02, 0x01]);
        } else {
            assert_eq!(bytes, vec![0x01, 0x02]);
        }
    }
}
