use std::io::Cursor;
use proptest::prelude::*;
use byte_huffman::{Frequencies, HuffmanTree};
use huffpack::{compress, decompress, CodecOptions, FileHeader, QuietUi};

fn compressed(data: &[u8], options: &CodecOptions) -> Vec<u8> {
    let mut output = Vec::new();
    compress(&mut Cursor::new(data), &mut output, options, &QuietUi).unwrap();
    output
}

fn decompressed(data: &[u8], options: &CodecOptions) -> Vec<u8> {
    let mut output = Vec::new();
    decompress(&mut &data[..], &mut output, options, &QuietUi).unwrap();
    output
}

fn codec_options() -> impl Strategy<Value = CodecOptions> {
    (1usize..64, 1usize..64, 1usize..64)
        .prop_map(|(read_buffer, write_buffer, chunk)| CodecOptions { read_buffer, write_buffer, chunk })
}

#[test]
fn all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(3 * 256 + 17).collect();
    let output = compressed(&data, &CodecOptions::default());
    assert_eq!(output[0], 255);
    assert_eq!(decompressed(&output, &CodecOptions::default()), data);
}

#[test]
fn single_byte() {
    let output = compressed(&[42], &CodecOptions::default());
    assert_eq!(output, [0, 7, 42, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(decompressed(&output, &CodecOptions::default()), [42]);
}

#[test]
fn empty() {
    assert!(compressed(&[], &CodecOptions::default()).is_empty());
    assert!(decompressed(&[], &CodecOptions::default()).is_empty());
}

proptest! {
    #[test]
    fn roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048), options in codec_options()) {
        let output = compressed(&data, &options);
        prop_assert_eq!(decompressed(&output, &options), data);
    }

    #[test]
    fn roundtrip_skewed(data in prop::collection::vec(prop::sample::select(vec![b'a', b'a', b'a', b'a', b'b', b'b', b'c', b'd']), 1..4096)) {
        let output = compressed(&data, &CodecOptions::default());
        prop_assert_eq!(decompressed(&output, &CodecOptions::default()), data);
    }

    #[test]
    fn repeated_byte(byte in any::<u8>(), len in 1usize..1000) {
        let data = vec![byte; len];
        let output = compressed(&data, &CodecOptions::default());
        prop_assert_eq!(output[0], 0);
        prop_assert_eq!(decompressed(&output, &CodecOptions::default()), data);
    }

    #[test]
    fn deterministic(data in prop::collection::vec(any::<u8>(), 0..1024), options in codec_options()) {
        prop_assert_eq!(compressed(&data, &options), compressed(&data, &CodecOptions::default()));
    }

    #[test]
    fn header_describes_input(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let output = compressed(&data, &CodecOptions::default());
        let mut rest = &output[..];
        let header = FileHeader::read(&mut rest).unwrap().unwrap();
        prop_assert_eq!(header.frequencies.total(), Some(data.len() as u64));
        prop_assert_eq!(&header.frequencies, &Frequencies::with_counted_all(&data));
        let mut distinct = data.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(header.unique_count() as usize, distinct.len());
        prop_assert_eq!(output[0] as usize, distinct.len() - 1);

        // body bits are 8 * body bytes - padding
        let codebook = HuffmanTree::from_frequencies(&header.frequencies).unwrap().codebook();
        let body_bits = header.frequencies.total_code_bits(&codebook).unwrap();
        prop_assert!(header.padding < 8);
        prop_assert_eq!(body_bits, 8 * rest.len() as u64 - header.padding as u64);
    }

    #[test]
    fn codes_are_prefix_free(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let codebook = HuffmanTree::from_frequencies(&Frequencies::with_counted_all(&data)).unwrap().codebook();
        prop_assert!(codebook.is_prefix_free());
        for (byte, code) in codebook.iter() {
            prop_assert!(data.contains(&byte));
            prop_assert!(!code.is_empty());
        }
    }
}
