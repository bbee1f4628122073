//! Arithmetic coding integration tests.

use bytepress_arith::{
    ArithmeticDecoder, ArithmeticEncoder, EOF_SYMBOL, FrequencyModel, compress, decompress,
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
fn test_arith_single_byte() {
    for byte in [0u8, 1, 127, 255] {
        let packed = compress(&[byte]).unwrap();
        assert_eq!(decompress(&packed).unwrap(), vec![byte]);
    }
}

#[test]
fn test_arith_repeated_byte_compresses() {
    let data = vec![b'x'; 10_000];
    let packed = compress(&data).unwrap();
    assert!(packed.len() < 200, "packed to {} bytes", packed.len());
    assert_eq!(decompress(&packed).unwrap(), data);
}

#[test]
fn test_arith_text() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    let packed = compress(&data).unwrap();
    assert!(packed.len() < data.len() * 3 / 4);
    assert_eq!(decompress(&packed).unwrap(), data);
}

#[test]
fn test_arith_uniform_random() {
    let data = random_bytes(64 * 1024, 0xDEAD_BEEF);
    let packed = compress(&data).unwrap();
    // Close to 8 bits per symbol plus the side table.
    assert!(packed.len() < data.len() + data.len() / 50 + 400);
    assert_eq!(decompress(&packed).unwrap(), data);
}

#[test]
fn test_arith_skewed_model_is_scaled() {
    // One dominant byte and a long tail of single occurrences.
    let mut data = vec![0u8; 50_000];
    data.extend(0..=255u8);
    let model = FrequencyModel::from_data(&data);
    assert!(model.scale() <= bytepress_arith::MAX_SCALE);
    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
}

#[test]
fn test_arith_caller_supplied_model() {
    // A model built from a superset of the data still round-trips.
    let model = FrequencyModel::from_data(b"abcdefghijklmnopqrstuvwxyz ");
    let message = b"hello world";

    let mut encoder = ArithmeticEncoder::new();
    encoder.encode_all(&model, message).unwrap();
    let bits = encoder.finish().unwrap();

    let mut decoder = ArithmeticDecoder::new(&bits).unwrap();
    assert_eq!(decoder.decode_all(&model).unwrap(), message);

    let mut encoder = ArithmeticEncoder::new();
    assert!(encoder.encode_all(&model, b"HELLO").is_err());
}

#[test]
fn test_arith_eof_symbol_index() {
    let model = FrequencyModel::from_data(b"z");
    let mut encoder = ArithmeticEncoder::new();
    encoder.encode_symbol(model.eof()).unwrap();
    let bits = encoder.finish().unwrap();

    let mut decoder = ArithmeticDecoder::new(&bits).unwrap();
    assert_eq!(decoder.decode_symbol(&model).unwrap(), EOF_SYMBOL);
}

proptest! {
    #[test]
    fn prop_arith_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_arith_skewed_roundtrip(data in prop::collection::vec(prop_oneof![
        8 => Just(b'e'),
        1 => any::<u8>(),
    ], 0..4096)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }
}
