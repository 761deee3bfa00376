#![doc = include_str!("../README.md")]

mod frequencies;
pub use frequencies::Frequencies;
mod tree;
pub use tree::{HuffmanTree, Node};
mod code;
pub use code::{Code, Codebook};
mod decoder;
pub use decoder::Decoder;

/// Number of different symbols (byte values).
pub const SYMBOLS: usize = 256;

/// Error returned when a Huffman tree cannot be constructed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// All frequencies are zero, so there is no symbol to code.
    #[error("cannot create tree with 0 unique bytes")]
    ZeroSymbols,
    /// The sum of frequencies does not fit in `u64`.
    #[error("sum of frequencies exceeds 64 bits")]
    FrequencyOverflow
}

/// Result of bit decoding returned by [`Decoder::consume`].
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum DecodingResult<T> {
    /// Completed value that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete,
    /// The codeword is invalid (possible only for the tree of a single-symbol alphabet).
    Invalid
}
