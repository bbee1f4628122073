//! LZSS integration tests.

use bytepress_core::BytePressError;
use bytepress_lzss::{
    LzssToken, MAX_MATCH_LENGTH, WINDOW_SIZE, compress, decompress, parse_tokens, serialize_tokens,
    tokenize,
};
use proptest::prelude::*;

fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 33) as u8);
    }
    data
}

#[test]
fn test_lzss_roundtrip_text() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let packed = compress(&original).expect("compression failed");
    assert!(packed.len() < original.len() / 2);
    assert_eq!(decompress(&packed).expect("decompression failed"), original);
}

#[test]
fn test_lzss_short_distinct_input_has_no_matches() {
    let original = b"0123456789";
    let tokens = tokenize(original);
    assert!(tokens.iter().all(|t| matches!(t, LzssToken::Literal(_))));
    assert_eq!(decompress(&compress(original).unwrap()).unwrap(), original);
}

#[test]
fn test_lzss_offset_at_window_edge() {
    // A block repeated exactly WINDOW_SIZE bytes later.
    let mut data = random_bytes(WINDOW_SIZE, 7);
    let head: Vec<u8> = data[..32].to_vec();
    data.extend_from_slice(&head);

    let tokens = tokenize(&data);
    let first_after = tokens
        .iter()
        .scan(0usize, |pos, t| {
            let start = *pos;
            *pos += t.output_len();
            Some((start, *t))
        })
        .find(|(start, _)| *start == WINDOW_SIZE)
        .map(|(_, t)| t);
    assert_eq!(
        first_after,
        Some(LzssToken::Match {
            offset: WINDOW_SIZE as u16,
            length: MAX_MATCH_LENGTH as u8
        })
    );

    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
}

#[test]
fn test_lzss_no_match_beyond_window() {
    // The only earlier copy is WINDOW_SIZE + 1 bytes back.
    let block = b"UNIQUEBLOCK";
    let mut data = block.to_vec();
    data.extend(std::iter::repeat_n(0u8, WINDOW_SIZE + 1 - block.len()));
    let start = data.len();
    data.extend_from_slice(block);

    let tokens = tokenize(&data);
    let mut pos = 0;
    for token in &tokens {
        if pos == start {
            assert_eq!(*token, LzssToken::Literal(b'U'));
        }
        pos += token.output_len();
    }
    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
}

#[test]
fn test_lzss_random_data() {
    let original = random_bytes(20_000, 99);
    assert_eq!(decompress(&compress(&original).unwrap()).unwrap(), original);
}

#[test]
fn test_lzss_long_runs() {
    let mut original = vec![0u8; 5000];
    original.extend(vec![0xAA; 300]);
    original.extend(b"tail");
    assert_eq!(decompress(&compress(&original).unwrap()).unwrap(), original);
}

#[test]
fn test_lzss_serialize_parse() {
    let tokens = tokenize(b"she sells sea shells, she sells sea shells");
    let bytes = serialize_tokens(&tokens).unwrap();
    assert_eq!(parse_tokens(&bytes).unwrap(), tokens);
}

#[test]
fn test_lzss_corrupt_inputs() {
    assert!(matches!(
        decompress(&[]),
        Err(BytePressError::InvalidFormat { .. })
    ));
    // Header claims 9 bits in the final byte.
    assert!(decompress(&[9, 0x00]).is_err());
    // A match before any literal.
    let bad = serialize_tokens(&[LzssToken::Match {
        offset: 1,
        length: 3,
    }])
    .unwrap();
    assert!(matches!(
        decompress(&bad),
        Err(BytePressError::InvalidFormat { .. })
    ));
}

proptest! {
    #[test]
    fn prop_lzss_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_lzss_low_entropy_roundtrip(data in prop::collection::vec(0u8..3, 0..4096)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }
}
