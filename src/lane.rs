//! This module defines the lane-register vocabulary shared by the transpose
//! kernels and the offline network search.
//!
//! A lane register is a fixed-width value type (`Lane16` for 128-bit,
//! `Lane32` for 256-bit) exposing the small set of interleave/permute
//! primitives that the hardware provides. On x86_64 the primitives lower to
//! the corresponding intrinsics; everywhere else a portable byte-level
//! fallback implements the exact same semantics, so results are bit-identical
//! across targets. The portable helpers stay compiled on all targets, which
//! lets the x86 test build assert intrinsic == portable directly.

use serde::{Deserialize, Serialize};

//==================================================================================
// 1. Granularity
//==================================================================================

/// The element size at which a pairwise interleave operates.
///
/// `DQword` (a whole 128-bit half) only exists on 32-byte registers, where it
/// models the cross-lane half swap; the other four granularities exist on
/// both register widths.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Byte,
    Word,
    Dword,
    Qword,
    DQword,
}

impl Granularity {
    /// The element size in bytes.
    pub fn bytes(&self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Dword => 4,
            Self::Qword => 8,
            Self::DQword => 16,
        }
    }
}

//==================================================================================
// 2. The LaneRegister trait
//==================================================================================

/// The behavioral contract of a lane register.
///
/// `interleave` produces the (low, high) pair familiar from the unpack
/// instruction families: the low result interleaves `gran`-sized groups from
/// the low halves of `a` and `b`, the high result does the same for the high
/// halves. The two self-permutes only exist on wide (32-byte) registers.
pub trait LaneRegister: Copy + Eq + std::fmt::Debug {
    const BYTES: usize;
    const WIDE: bool;
    const ZERO: Self;

    /// Builds a register from a byte-position labeling function.
    fn from_fn(f: impl FnMut(usize) -> u8) -> Self;

    /// Loads a register from the first `Self::BYTES` bytes of `bytes`.
    fn load(bytes: &[u8]) -> Self;

    /// Stores the register into the first `Self::BYTES` bytes of `out`.
    fn store(self, out: &mut [u8]);

    /// Pairwise group interleave; see the trait docs for the (low, high) contract.
    fn interleave(a: Self, b: Self, gran: Granularity) -> (Self, Self);

    /// Cross-lane qword permute q0,q2,q1,q3 (wide registers only).
    fn permute_quads(self) -> Self;

    /// Per-lane dword shuffle d0,d2,d1,d3 (wide registers only).
    fn shuffle_dwords(self) -> Self;
}

//==================================================================================
// 3. Portable reference semantics
//==================================================================================

/// Byte-level implementations of every primitive. These define the semantics;
/// the intrinsic paths below must agree with them bit for bit.
pub(crate) mod portable {
    /// Interleaves `g`-byte groups of two 16-byte halves, unpack-style.
    pub fn interleave16(a: &[u8; 16], b: &[u8; 16], g: usize) -> ([u8; 16], [u8; 16]) {
        debug_assert!(matches!(g, 1 | 2 | 4 | 8));
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        for k in 0..8 / g {
            for off in 0..g {
                lo[(2 * k) * g + off] = a[k * g + off];
                lo[(2 * k + 1) * g + off] = b[k * g + off];
                hi[(2 * k) * g + off] = a[8 + k * g + off];
                hi[(2 * k + 1) * g + off] = b[8 + k * g + off];
            }
        }
        (lo, hi)
    }

    /// Reorders the four dwords of a 16-byte half as d0,d2,d1,d3.
    pub fn shuffle_dwords16(a: &[u8; 16]) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (dst, src) in [0usize, 2, 1, 3].into_iter().enumerate() {
            out[dst * 4..dst * 4 + 4].copy_from_slice(&a[src * 4..src * 4 + 4]);
        }
        out
    }

    /// Reorders the four qwords of a 32-byte register as q0,q2,q1,q3.
    pub fn permute_quads32(a: &[u8; 32]) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (dst, src) in [0usize, 2, 1, 3].into_iter().enumerate() {
            out[dst * 8..dst * 8 + 8].copy_from_slice(&a[src * 8..src * 8 + 8]);
        }
        out
    }
}

//==================================================================================
// 4. Lane16 (128-bit register)
//==================================================================================

/// A 16-byte lane register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)] // This is needed to make `transmute`s to __m128i safe.
pub struct Lane16(pub [u8; 16]);

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
mod sse2 {
    use super::Granularity;
    use core::arch::x86_64::*;
    use core::mem::transmute;

    #[inline(always)]
    pub(super) fn interleave(a: [u8; 16], b: [u8; 16], gran: Granularity) -> ([u8; 16], [u8; 16]) {
        // SAFETY: sse2 is statically enabled for this module via cfg, and
        // [u8; 16] <-> __m128i transmutes are between same-size plain types.
        unsafe {
            let va: __m128i = transmute(a);
            let vb: __m128i = transmute(b);
            let (lo, hi) = match gran {
                Granularity::Byte => (_mm_unpacklo_epi8(va, vb), _mm_unpackhi_epi8(va, vb)),
                Granularity::Word => (_mm_unpacklo_epi16(va, vb), _mm_unpackhi_epi16(va, vb)),
                Granularity::Dword => (_mm_unpacklo_epi32(va, vb), _mm_unpackhi_epi32(va, vb)),
                Granularity::Qword => (_mm_unpacklo_epi64(va, vb), _mm_unpackhi_epi64(va, vb)),
                Granularity::DQword => panic!("16-byte registers have no 128-bit interleave"),
            };
            (transmute(lo), transmute(hi))
        }
    }
}

impl LaneRegister for Lane16 {
    const BYTES: usize = 16;
    const WIDE: bool = false;
    const ZERO: Self = Self([0; 16]);

    fn from_fn(mut f: impl FnMut(usize) -> u8) -> Self {
        let mut bytes = [0u8; 16];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = f(i);
        }
        Self(bytes)
    }

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        let mut reg = [0u8; 16];
        reg.copy_from_slice(&bytes[..16]);
        Self(reg)
    }

    #[inline(always)]
    fn store(self, out: &mut [u8]) {
        out[..16].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn interleave(a: Self, b: Self, gran: Granularity) -> (Self, Self) {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            let (lo, hi) = sse2::interleave(a.0, b.0, gran);
            (Self(lo), Self(hi))
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
        {
            if gran == Granularity::DQword {
                panic!("16-byte registers have no 128-bit interleave");
            }
            let (lo, hi) = portable::interleave16(&a.0, &b.0, gran.bytes());
            (Self(lo), Self(hi))
        }
    }

    fn permute_quads(self) -> Self {
        panic!("permute_quads requires a 32-byte register");
    }

    fn shuffle_dwords(self) -> Self {
        panic!("shuffle_dwords requires a 32-byte register");
    }
}

//==================================================================================
// 5. Lane32 (256-bit register)
//==================================================================================

/// A 32-byte lane register. Group interleaves act independently on each
/// 128-bit half, exactly like the 256-bit unpack instruction families; only
/// the DQword interleave and the two self-permutes move bytes across halves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)] // This is needed to make `transmute`s to __m256i safe.
pub struct Lane32(pub [u8; 32]);

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
mod avx2 {
    use super::Granularity;
    use core::arch::x86_64::*;
    use core::mem::transmute;

    #[inline(always)]
    pub(super) fn interleave(a: [u8; 32], b: [u8; 32], gran: Granularity) -> ([u8; 32], [u8; 32]) {
        // SAFETY: avx2 is statically enabled for this module via cfg, and
        // [u8; 32] <-> __m256i transmutes are between same-size plain types.
        unsafe {
            let va: __m256i = transmute(a);
            let vb: __m256i = transmute(b);
            let (lo, hi) = match gran {
                Granularity::Byte => (_mm256_unpacklo_epi8(va, vb), _mm256_unpackhi_epi8(va, vb)),
                Granularity::Word => (_mm256_unpacklo_epi16(va, vb), _mm256_unpackhi_epi16(va, vb)),
                Granularity::Dword => (_mm256_unpacklo_epi32(va, vb), _mm256_unpackhi_epi32(va, vb)),
                Granularity::Qword => (_mm256_unpacklo_epi64(va, vb), _mm256_unpackhi_epi64(va, vb)),
                Granularity::DQword => (
                    _mm256_permute2x128_si256::<0x20>(va, vb),
                    _mm256_permute2x128_si256::<0x31>(va, vb),
                ),
            };
            (transmute(lo), transmute(hi))
        }
    }

    #[inline(always)]
    pub(super) fn permute_quads(a: [u8; 32]) -> [u8; 32] {
        // SAFETY: as above.
        unsafe { transmute(_mm256_permute4x64_epi64::<0xD8>(transmute::<_, __m256i>(a))) }
    }

    #[inline(always)]
    pub(super) fn shuffle_dwords(a: [u8; 32]) -> [u8; 32] {
        // SAFETY: as above.
        unsafe { transmute(_mm256_shuffle_epi32::<0xD8>(transmute::<_, __m256i>(a))) }
    }
}

impl Lane32 {
    fn halves(&self) -> ([u8; 16], [u8; 16]) {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&self.0[..16]);
        hi.copy_from_slice(&self.0[16..]);
        (lo, hi)
    }

    fn from_halves(lo: [u8; 16], hi: [u8; 16]) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&lo);
        bytes[16..].copy_from_slice(&hi);
        Self(bytes)
    }
}

impl LaneRegister for Lane32 {
    const BYTES: usize = 32;
    const WIDE: bool = true;
    const ZERO: Self = Self([0; 32]);

    fn from_fn(mut f: impl FnMut(usize) -> u8) -> Self {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = f(i);
        }
        Self(bytes)
    }

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        let mut reg = [0u8; 32];
        reg.copy_from_slice(&bytes[..32]);
        Self(reg)
    }

    #[inline(always)]
    fn store(self, out: &mut [u8]) {
        out[..32].copy_from_slice(&self.0);
    }

    #[inline(always)]
    fn interleave(a: Self, b: Self, gran: Granularity) -> (Self, Self) {
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            let (lo, hi) = avx2::interleave(a.0, b.0, gran);
            (Self(lo), Self(hi))
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
        {
            let (a_lo, a_hi) = a.halves();
            let (b_lo, b_hi) = b.halves();
            if gran == Granularity::DQword {
                return (
                    Self::from_halves(a_lo, b_lo),
                    Self::from_halves(a_hi, b_hi),
                );
            }
            let g = gran.bytes();
            let (lo_l, hi_l) = portable::interleave16(&a_lo, &b_lo, g);
            let (lo_h, hi_h) = portable::interleave16(&a_hi, &b_hi, g);
            (Self::from_halves(lo_l, lo_h), Self::from_halves(hi_l, hi_h))
        }
    }

    #[inline(always)]
    fn permute_quads(self) -> Self {
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            Self(avx2::permute_quads(self.0))
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
        {
            Self(portable::permute_quads32(&self.0))
        }
    }

    #[inline(always)]
    fn shuffle_dwords(self) -> Self {
        #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
        {
            Self(avx2::shuffle_dwords(self.0))
        }
        #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
        {
            let (lo, hi) = self.halves();
            Self::from_halves(portable::shuffle_dwords16(&lo), portable::shuffle_dwords16(&hi))
        }
    }
}
