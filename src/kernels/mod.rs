//! This module serves as the public API and dispatcher for the transpose
//! kernels.
//!
//! The dispatchers are the narrow contract a columnar writer consumes per
//! chunk: it knows the element type of a column as a [`SplitType`] and hands
//! over raw bytes; the dispatcher routes to the right monomorphized kernel.

use crate::error::ByteplaneError;
use crate::types::SplitType;
use crate::utils::safe_bytes_to_typed_slice;

pub mod split;

#[cfg(test)]
mod split_tests;

/// The unified dispatcher for ENCODE operations.
pub fn dispatch_encode(
    dtype: SplitType,
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    log_metric!(
        "event" = "dispatch_encode",
        "dtype" = &dtype,
        "num_bytes" = &input_bytes.len()
    );
    match dtype {
        SplitType::Int32 => split::encode(safe_bytes_to_typed_slice::<i32>(input_bytes)?, output_buf),
        SplitType::UInt32 => split::encode(safe_bytes_to_typed_slice::<u32>(input_bytes)?, output_buf),
        SplitType::Float32 => split::encode(safe_bytes_to_typed_slice::<f32>(input_bytes)?, output_buf),
        SplitType::Int64 => split::encode(safe_bytes_to_typed_slice::<i64>(input_bytes)?, output_buf),
        SplitType::UInt64 => split::encode(safe_bytes_to_typed_slice::<u64>(input_bytes)?, output_buf),
        SplitType::Float64 => split::encode(safe_bytes_to_typed_slice::<f64>(input_bytes)?, output_buf),
    }
}

/// The unified dispatcher for DECODE operations.
pub fn dispatch_decode(
    dtype: SplitType,
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    log_metric!(
        "event" = "dispatch_decode",
        "dtype" = &dtype,
        "num_bytes" = &input_bytes.len()
    );
    match dtype {
        SplitType::Int32 => split::decode::<i32>(input_bytes, output_buf),
        SplitType::UInt32 => split::decode::<u32>(input_bytes, output_buf),
        SplitType::Float32 => split::decode::<f32>(input_bytes, output_buf),
        SplitType::Int64 => split::decode::<i64>(input_bytes, output_buf),
        SplitType::UInt64 => split::decode::<u64>(input_bytes, output_buf),
        SplitType::Float64 => split::decode::<f64>(input_bytes, output_buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::typed_slice_to_bytes;

    #[test]
    fn test_dispatch_roundtrip_float64() {
        let original: Vec<f64> = (0..37).map(|i| i as f64 * 0.5).collect();
        let original_bytes = typed_slice_to_bytes(&original);

        let mut encoded = Vec::new();
        dispatch_encode(SplitType::Float64, &original_bytes, &mut encoded).unwrap();
        assert_eq!(encoded.len(), original_bytes.len());

        let mut decoded = Vec::new();
        dispatch_decode(SplitType::Float64, &encoded, &mut decoded).unwrap();
        assert_eq!(decoded, original_bytes);
    }

    #[test]
    fn test_dispatch_encode_rejects_short_buffer() {
        // 6 bytes is not a whole number of 4-byte elements.
        let bytes = vec![0u8; 6];
        let mut out = Vec::new();
        let result = dispatch_encode(SplitType::Float32, &bytes, &mut out);
        assert!(matches!(result, Err(ByteplaneError::PodCast(_))));
    }
}
