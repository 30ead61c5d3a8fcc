//! The test suite for the byte-stream-split kernel: round-trips, scalar vs
//! vectorized equivalence, layout pinning, and consistency between the
//! unrolled block paths and the recorded networks they were derived from.

use super::split::{
    self, decode, decode_scalar, encode, encode_scalar, Splittable, BLOCK_LEN,
};
use crate::error::ByteplaneError;
use crate::lane::{Lane16, LaneRegister};
use crate::search::{transpose_goal, Network};
use crate::traits::HasBits;
use crate::utils::typed_slice_to_bytes;
use rand::distr::{Distribution, StandardUniform};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generates elements with arbitrary bit patterns through the integer view,
/// so float inputs cover NaNs and subnormals too; the transform is
/// layout-based, not value-based.
fn random_elements<T: Splittable>(n: usize, rng: &mut StdRng) -> Vec<T>
where
    StandardUniform: Distribution<<T as HasBits>::Bits>,
{
    (0..n)
        .map(|_| bytemuck::cast(rng.random::<<T as HasBits>::Bits>()))
        .collect()
}

/// Lengths straddling the block boundary, plus a large non-aligned count.
const LENGTHS: [usize; 11] = [0, 1, 5, 15, 16, 17, 31, 32, 33, 100, 1013];

fn assert_roundtrip_and_equivalence<T: Splittable>(rng: &mut StdRng)
where
    StandardUniform: Distribution<<T as HasBits>::Bits>,
{
    for n in LENGTHS {
        let input = random_elements::<T>(n, rng);
        let input_bytes = typed_slice_to_bytes(&input);

        let mut fast = Vec::new();
        let mut reference = Vec::new();
        encode(&input, &mut fast).unwrap();
        encode_scalar(&input, &mut reference).unwrap();
        assert_eq!(fast, reference, "encode mismatch at n={}", n);

        let mut decoded_fast = Vec::new();
        let mut decoded_reference = Vec::new();
        decode::<T>(&fast, &mut decoded_fast).unwrap();
        decode_scalar::<T>(&fast, &mut decoded_reference).unwrap();
        assert_eq!(decoded_fast, decoded_reference, "decode mismatch at n={}", n);
        assert_eq!(decoded_fast, input_bytes, "roundtrip mismatch at n={}", n);
    }
}

#[test]
fn test_roundtrip_and_cross_implementation_f32() {
    let mut rng = StdRng::seed_from_u64(0xF32);
    assert_roundtrip_and_equivalence::<f32>(&mut rng);
}

#[test]
fn test_roundtrip_and_cross_implementation_f64() {
    let mut rng = StdRng::seed_from_u64(0xF64);
    assert_roundtrip_and_equivalence::<f64>(&mut rng);
}

#[test]
fn test_roundtrip_integer_types() {
    let mut rng = StdRng::seed_from_u64(42);
    assert_roundtrip_and_equivalence::<u32>(&mut rng);
    assert_roundtrip_and_equivalence::<i32>(&mut rng);
    assert_roundtrip_and_equivalence::<u64>(&mut rng);
    assert_roundtrip_and_equivalence::<i64>(&mut rng);
}

/// The wire layout, pinned byte for byte: five 4-byte elements (below one
/// block, so this exercises the pure scalar path).
#[test]
fn test_concrete_layout_w4_n5() {
    let input: Vec<f32> = (0..5u8)
        .map(|i| f32::from_le_bytes([4 * i, 4 * i + 1, 4 * i + 2, 4 * i + 3]))
        .collect();

    let mut encoded = Vec::new();
    encode(&input, &mut encoded).unwrap();

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        0, 4, 8, 12, 16,   // byte 0 of e0..e4
        1, 5, 9, 13, 17,   // byte 1
        2, 6, 10, 14, 18,  // byte 2
        3, 7, 11, 15, 19,  // byte 3
    ];
    assert_eq!(encoded, expected);
}

/// Every input byte lands at exactly plane_out[k*n + i]; nothing is dropped
/// or duplicated.
#[test]
fn test_bijective_plane_indexing() {
    let mut rng = StdRng::seed_from_u64(99);
    let n = 40;
    let input = random_elements::<f64>(n, &mut rng);
    let input_bytes = typed_slice_to_bytes(&input);

    let mut encoded = Vec::new();
    encode(&input, &mut encoded).unwrap();
    for i in 0..n {
        for k in 0..8 {
            assert_eq!(
                encoded[k * n + i],
                input_bytes[i * 8 + k],
                "plane byte (k={}, i={})",
                k,
                i
            );
        }
    }
}

/// The 8-byte tail must be sized with the 8-byte width. A tail computed with
/// the 4-byte width instead would corrupt exactly these decodes, so keep
/// non-block-aligned double counts covered.
#[test]
fn test_double_decode_with_unaligned_tail() {
    let mut rng = StdRng::seed_from_u64(0xDEC0);
    for n in [17, 23] {
        let planes: Vec<u8> = (0..n * 8).map(|_| rng.random()).collect();

        let mut fast = Vec::new();
        let mut reference = Vec::new();
        decode::<f64>(&planes, &mut fast).unwrap();
        decode_scalar::<f64>(&planes, &mut reference).unwrap();
        assert_eq!(fast, reference, "tail mismatch at n={}", n);
    }
}

#[test]
fn test_empty_input_yields_empty_output() {
    let input: Vec<f32> = Vec::new();
    let mut encoded = vec![0xAA; 8];
    encode(&input, &mut encoded).unwrap();
    assert!(encoded.is_empty());

    let mut decoded = vec![0xAA; 8];
    decode::<f32>(&[], &mut decoded).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_decode_invalid_length_error() {
    let mut out = Vec::new();
    let result = decode::<f32>(&[0u8; 10], &mut out);
    assert!(matches!(result, Err(ByteplaneError::BufferMismatch(10, 4))));

    let result = decode::<f64>(&[0u8; 12], &mut out);
    assert!(matches!(result, Err(ByteplaneError::BufferMismatch(12, 8))));
}

/// The unrolled block paths must implement exactly the recorded networks.
#[test]
fn test_block_paths_match_recorded_networks_w4() {
    let input: Vec<f32> = (0..16u32)
        .map(|i| f32::from_bits(u32::from_le_bytes(std::array::from_fn(|j| (4 * i) as u8 + j as u8))))
        .collect();
    let input_bytes = typed_slice_to_bytes(&input);

    let mut encoded = Vec::new();
    encode(&input, &mut encoded).unwrap();

    let regs: [Lane16; 4] = std::array::from_fn(|i| Lane16::load(&input_bytes[i * 16..]));
    let planes = Network::new(split::SPLIT_NETWORK_W4.to_vec()).apply(regs);
    let mut via_network = vec![0u8; 64];
    for (k, plane) in planes.iter().enumerate() {
        plane.store(&mut via_network[k * 16..]);
    }
    assert_eq!(encoded, via_network);

    let back = Network::new(split::UNSPLIT_NETWORK_W4.to_vec()).apply(planes);
    let mut via_inverse = vec![0u8; 64];
    for (j, reg) in back.iter().enumerate() {
        reg.store(&mut via_inverse[j * 16..]);
    }
    assert_eq!(via_inverse, input_bytes);
}

#[test]
fn test_block_paths_match_recorded_networks_w8() {
    let input: Vec<f64> = (0..16u32)
        .map(|i| f64::from_bits(u64::from_le_bytes(std::array::from_fn(|j| (8 * i) as u8 + j as u8))))
        .collect();
    let input_bytes = typed_slice_to_bytes(&input);

    let mut encoded = Vec::new();
    encode(&input, &mut encoded).unwrap();

    let regs: [Lane16; 8] = std::array::from_fn(|i| Lane16::load(&input_bytes[i * 16..]));
    let planes = Network::new(split::SPLIT_NETWORK_W8.to_vec()).apply(regs);
    let mut via_network = vec![0u8; 128];
    for (k, plane) in planes.iter().enumerate() {
        plane.store(&mut via_network[k * 16..]);
    }
    assert_eq!(encoded, via_network);

    let back = Network::new(split::UNSPLIT_NETWORK_W8.to_vec()).apply(planes);
    let mut via_inverse = vec![0u8; 128];
    for (j, reg) in back.iter().enumerate() {
        reg.store(&mut via_inverse[j * 16..]);
    }
    assert_eq!(via_inverse, input_bytes);
}

/// The recorded networks map the canonical search labelings exactly, tying
/// the shipped fast paths back to the goals the search derives them from.
#[test]
fn test_recorded_networks_solve_the_canonical_goals() {
    let (initial, target) = transpose_goal::<Lane16, 4>(4).unwrap();
    assert_eq!(Network::new(split::SPLIT_NETWORK_W4.to_vec()).apply(initial), target);
    assert_eq!(Network::new(split::UNSPLIT_NETWORK_W4.to_vec()).apply(target), initial);

    let (initial, target) = transpose_goal::<Lane16, 8>(8).unwrap();
    assert_eq!(Network::new(split::SPLIT_NETWORK_W8.to_vec()).apply(initial), target);
    assert_eq!(Network::new(split::UNSPLIT_NETWORK_W8.to_vec()).apply(target), initial);
}

#[test]
fn test_bits_view_matches_width() {
    assert_eq!(std::mem::size_of::<<f32 as HasBits>::Bits>(), <f32 as Splittable>::WIDTH);
    assert_eq!(std::mem::size_of::<<u32 as HasBits>::Bits>(), <u32 as Splittable>::WIDTH);
    assert_eq!(std::mem::size_of::<<f64 as HasBits>::Bits>(), <f64 as Splittable>::WIDTH);
    assert_eq!(std::mem::size_of::<<i64 as HasBits>::Bits>(), <i64 as Splittable>::WIDTH);
}

/// One block plus a tail, decoded in one call: the two regions are disjoint
/// and stitch back together exactly.
#[test]
fn test_block_and_tail_regions_are_disjoint() {
    let mut rng = StdRng::seed_from_u64(0xB10C);
    let n = BLOCK_LEN + 3;
    let input = random_elements::<f32>(n, &mut rng);

    let mut encoded = Vec::new();
    encode(&input, &mut encoded).unwrap();

    let mut decoded = Vec::new();
    decode::<f32>(&encoded, &mut decoded).unwrap();
    assert_eq!(decoded, typed_slice_to_bytes(&input));
}
