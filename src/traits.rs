//! This module defines shared traits used across different kernels.

use bytemuck::Pod;
use num_traits::PrimInt;

/// A trait that maps an element type to the unsigned integer type sharing its
/// width and bit pattern (e.g. `f32` -> `u32`). The codec itself only moves
/// bytes, but callers post-processing planes or generating test data want the
/// integer view.
pub trait HasBits {
    type Bits: PrimInt + Pod;
}

// Implement the trait for every element type the splitter accepts.
macro_rules! impl_bits_pair {
    ($T:ty, $B:ty) => {
        impl HasBits for $T {
            type Bits = $B;
        }
    };
}

impl_bits_pair!(f32, u32);
impl_bits_pair!(u32, u32);
impl_bits_pair!(i32, u32);
impl_bits_pair!(f64, u64);
impl_bits_pair!(u64, u64);
impl_bits_pair!(i64, u64);
