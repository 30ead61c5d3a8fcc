//! This module contains the pure, stateless, and performant kernel for the
//! byte-stream-split transpose on streams of fixed-width elements.
//!
//! Encoding reorganizes a row-oriented byte stream into a byte-plane layout:
//! plane k holds byte k of every element, planes concatenated in increasing
//! k. The layout is bit-exact to Parquet's BYTE_STREAM_SPLIT physical
//! encoding, so `plane[k * n + i] == element_bytes[i * WIDTH + k]` for every
//! element i and byte k. Decoding is the exact inverse. Only the in-memory
//! byte layout matters; arbitrary bit patterns round-trip unchanged.
//!
//! Two mutually consistent implementations are kept: a scalar reference
//! (ground truth, and the tail path for element counts not aligned to a
//! block) and a vectorized path processing [`BLOCK_LEN`] elements per
//! iteration through a fixed interleave network over [`Lane16`] registers.
//! The networks are the minimal sequences found by the offline search in
//! `crate::search`; they are recorded below as command sequences and the
//! test suite asserts that the unrolled code matches them.
//!
//! Input and output never alias: the API takes a shared input slice and an
//! exclusive output buffer, so the borrow checker rules out in-place use.

use crate::error::ByteplaneError;
use crate::lane::{Granularity, Lane16, LaneRegister};
use crate::search::command::{Command, Pairing};
use crate::traits::HasBits;

/// Elements processed by one application of the vectorized block path.
pub const BLOCK_LEN: usize = 16;

//==================================================================================
// 1. The element contract
//==================================================================================

/// A fixed-width element the splitter accepts: plain-old-data, 4 or 8 bytes.
///
/// The two block methods are implementation detail wired up per width by the
/// macro below; width dispatch happens at monomorphization time, never inside
/// the hot loop.
pub trait Splittable: bytemuck::Pod + HasBits {
    const WIDTH: usize;

    #[doc(hidden)]
    fn split_block(input: &[u8], output: &mut [u8], num_elements: usize, block: usize);

    #[doc(hidden)]
    fn unsplit_block(input: &[u8], output: &mut [u8], num_elements: usize, block: usize);
}

macro_rules! impl_splittable {
    ($width:literal, $split:ident, $unsplit:ident, $($t:ty),+) => {
        $(
            impl Splittable for $t {
                const WIDTH: usize = $width;

                #[inline]
                fn split_block(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
                    $split(input, output, num_elements, block)
                }

                #[inline]
                fn unsplit_block(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
                    $unsplit(input, output, num_elements, block)
                }
            }

            const _: () = assert!(std::mem::size_of::<$t>() == $width);
        )+
    };
}

impl_splittable!(4, split_block_w4, unsplit_block_w4, f32, u32, i32);
impl_splittable!(8, split_block_w8, unsplit_block_w8, f64, u64, i64);

//==================================================================================
// 2. Derived networks
//==================================================================================

const fn unpack(gran: Granularity, pairing: Pairing) -> Command {
    Command::Interleave { gran, pairing }
}

/// The minimal 4-byte encode network: three byte-granularity next-pair
/// rounds, then one qword skip-pair round.
pub const SPLIT_NETWORK_W4: [Command; 4] = [
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Qword, Pairing::Skip),
];

/// The minimal 4-byte decode network: two byte-granularity skip-pair rounds.
pub const UNSPLIT_NETWORK_W4: [Command; 2] = [
    unpack(Granularity::Byte, Pairing::Skip),
    unpack(Granularity::Byte, Pairing::Skip),
];

/// The minimal 8-byte encode network: two byte-granularity next-pair rounds,
/// then two dword skip-pair rounds.
pub const SPLIT_NETWORK_W8: [Command; 4] = [
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Byte, Pairing::Next),
    unpack(Granularity::Dword, Pairing::Skip),
    unpack(Granularity::Dword, Pairing::Skip),
];

/// The minimal 8-byte decode network: three byte-granularity skip-pair rounds.
pub const UNSPLIT_NETWORK_W8: [Command; 3] = [
    unpack(Granularity::Byte, Pairing::Skip),
    unpack(Granularity::Byte, Pairing::Skip),
    unpack(Granularity::Byte, Pairing::Skip),
];

//==================================================================================
// 3. Vectorized block paths
//==================================================================================

/// One 4-byte block: 16 elements across four registers in, four planes out.
fn split_block_w4(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
    let base = block * BLOCK_LEN * 4;
    let mut s: [Lane16; 4] = std::array::from_fn(|i| Lane16::load(&input[base + i * 16..]));

    // Three byte rounds gather byte k of eight elements per register half.
    for _ in 0..3 {
        let mut t = [Lane16::ZERO; 4];
        for i in 0..2 {
            let (lo, hi) = Lane16::interleave(s[2 * i], s[2 * i + 1], Granularity::Byte);
            t[2 * i] = lo;
            t[2 * i + 1] = hi;
        }
        s = t;
    }
    // One qword round splices the element halves of each plane.
    let mut planes = [Lane16::ZERO; 4];
    for i in 0..2 {
        let (lo, hi) = Lane16::interleave(s[i], s[i + 2], Granularity::Qword);
        planes[2 * i] = lo;
        planes[2 * i + 1] = hi;
    }

    for (k, plane) in planes.iter().enumerate() {
        plane.store(&mut output[k * num_elements + block * BLOCK_LEN..]);
    }
}

/// The inverse of [`split_block_w4`].
fn unsplit_block_w4(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
    let mut s: [Lane16; 4] =
        std::array::from_fn(|k| Lane16::load(&input[k * num_elements + block * BLOCK_LEN..]));

    for _ in 0..2 {
        let mut t = [Lane16::ZERO; 4];
        for i in 0..2 {
            let (lo, hi) = Lane16::interleave(s[i], s[i + 2], Granularity::Byte);
            t[2 * i] = lo;
            t[2 * i + 1] = hi;
        }
        s = t;
    }

    let base = block * BLOCK_LEN * 4;
    for (j, reg) in s.iter().enumerate() {
        reg.store(&mut output[base + j * 16..]);
    }
}

/// One 8-byte block: 16 elements across eight registers in, eight planes out.
fn split_block_w8(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
    let base = block * BLOCK_LEN * 8;
    let mut s: [Lane16; 8] = std::array::from_fn(|i| Lane16::load(&input[base + i * 16..]));

    for _ in 0..2 {
        let mut t = [Lane16::ZERO; 8];
        for i in 0..4 {
            let (lo, hi) = Lane16::interleave(s[2 * i], s[2 * i + 1], Granularity::Byte);
            t[2 * i] = lo;
            t[2 * i + 1] = hi;
        }
        s = t;
    }
    for _ in 0..2 {
        let mut t = [Lane16::ZERO; 8];
        for i in 0..4 {
            let (lo, hi) = Lane16::interleave(s[i], s[i + 4], Granularity::Dword);
            t[2 * i] = lo;
            t[2 * i + 1] = hi;
        }
        s = t;
    }

    for (k, plane) in s.iter().enumerate() {
        plane.store(&mut output[k * num_elements + block * BLOCK_LEN..]);
    }
}

/// The inverse of [`split_block_w8`].
fn unsplit_block_w8(input: &[u8], output: &mut [u8], num_elements: usize, block: usize) {
    let mut s: [Lane16; 8] =
        std::array::from_fn(|k| Lane16::load(&input[k * num_elements + block * BLOCK_LEN..]));

    for _ in 0..3 {
        let mut t = [Lane16::ZERO; 8];
        for i in 0..4 {
            let (lo, hi) = Lane16::interleave(s[i], s[i + 4], Granularity::Byte);
            t[2 * i] = lo;
            t[2 * i + 1] = hi;
        }
        s = t;
    }

    let base = block * BLOCK_LEN * 8;
    for (j, reg) in s.iter().enumerate() {
        reg.store(&mut output[base + j * 16..]);
    }
}

//==================================================================================
// 4. Scalar reference
//==================================================================================

/// Splits elements `from..to` one byte at a time. Ground truth for the block
/// paths, and the tail path for `num_elements % BLOCK_LEN` leftovers. The
/// tail always uses `T::WIDTH`; indexing with any other width silently
/// corrupts the tail region of wider types.
fn split_scalar_range<T: Splittable>(
    input: &[u8],
    output: &mut [u8],
    num_elements: usize,
    from: usize,
    to: usize,
) {
    for i in from..to {
        for k in 0..T::WIDTH {
            output[k * num_elements + i] = input[i * T::WIDTH + k];
        }
    }
}

/// The exact inverse of [`split_scalar_range`].
fn unsplit_scalar_range<T: Splittable>(
    input: &[u8],
    output: &mut [u8],
    num_elements: usize,
    from: usize,
    to: usize,
) {
    for i in from..to {
        for k in 0..T::WIDTH {
            output[i * T::WIDTH + k] = input[k * num_elements + i];
        }
    }
}

//==================================================================================
// 5. Public API
//==================================================================================

/// Encodes a slice of elements into the byte-plane layout, writing into the
/// caller's buffer. The buffer is cleared and resized to exactly
/// `input.len() * T::WIDTH` bytes; an empty input yields an empty buffer.
///
/// Full blocks of [`BLOCK_LEN`] elements go through the vectorized network;
/// the remainder goes through the scalar reference. The two write disjoint
/// output ranges, so their order is immaterial.
pub fn encode<T: Splittable>(
    input: &[T],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    let num_elements = input.len();
    let bytes: &[u8] = bytemuck::cast_slice(input);
    output_buf.clear();
    output_buf.resize(num_elements * T::WIDTH, 0);

    let blocks = num_elements / BLOCK_LEN;
    split_scalar_range::<T>(bytes, output_buf, num_elements, blocks * BLOCK_LEN, num_elements);
    for block in 0..blocks {
        T::split_block(bytes, output_buf, num_elements, block);
    }
    Ok(())
}

/// Decodes a byte-plane buffer back into the contiguous element layout.
/// The exact functional inverse of [`encode`].
///
/// # Errors
/// Returns `ByteplaneError::BufferMismatch` if the input length is not a
/// multiple of `T::WIDTH`.
pub fn decode<T: Splittable>(
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    if input_bytes.len() % T::WIDTH != 0 {
        return Err(ByteplaneError::BufferMismatch(
            input_bytes.len(),
            T::WIDTH,
        ));
    }
    let num_elements = input_bytes.len() / T::WIDTH;
    output_buf.clear();
    output_buf.resize(input_bytes.len(), 0);

    let blocks = num_elements / BLOCK_LEN;
    unsplit_scalar_range::<T>(
        input_bytes,
        output_buf,
        num_elements,
        blocks * BLOCK_LEN,
        num_elements,
    );
    for block in 0..blocks {
        T::unsplit_block(input_bytes, output_buf, num_elements, block);
    }
    Ok(())
}

/// The scalar reference encoder. Byte-identical to [`encode`] on every input;
/// public as ground truth for tests and benches.
pub fn encode_scalar<T: Splittable>(
    input: &[T],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    let num_elements = input.len();
    let bytes: &[u8] = bytemuck::cast_slice(input);
    output_buf.clear();
    output_buf.resize(num_elements * T::WIDTH, 0);
    split_scalar_range::<T>(bytes, output_buf, num_elements, 0, num_elements);
    Ok(())
}

/// The scalar reference decoder. Byte-identical to [`decode`] on every input.
pub fn decode_scalar<T: Splittable>(
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), ByteplaneError> {
    if input_bytes.len() % T::WIDTH != 0 {
        return Err(ByteplaneError::BufferMismatch(
            input_bytes.len(),
            T::WIDTH,
        ));
    }
    let num_elements = input_bytes.len() / T::WIDTH;
    output_buf.clear();
    output_buf.resize(input_bytes.len(), 0);
    unsplit_scalar_range::<T>(input_bytes, output_buf, num_elements, 0, num_elements);
    Ok(())
}
