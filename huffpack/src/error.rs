use std::io;
use std::path::PathBuf;
use byte_huffman::TreeError;

/// Result type of compression and decompression.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that break compression or decompression.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file does not exist, cannot be read, or is empty.
    #[error("Input file {} doesn't exist, or it's empty.", .path.display())]
    InputMissingOrEmpty { path: PathBuf },

    /// The output file cannot be created.
    #[error("Cannot create or write to output file {}: {source}", .path.display())]
    OutputUnwritable { path: PathBuf, source: io::Error },

    /// The header of compressed data is truncated or inconsistent.
    #[error("Corrupt file header: {0}")]
    CorruptHeader(String),

    /// The header of compressed data describes zero distinct bytes.
    #[error("Cannot create tree with 0 unique bytes.")]
    ZeroSymbolFrequencyTable,

    /// Compressed data end before all bytes are decoded.
    #[error("Compressed data are truncated: decoded {decoded} of {expected} bytes.")]
    TruncatedBody { decoded: u64, expected: u64 },

    /// Compressed data contain invalid or inconsistent codes.
    #[error("Compressed data are corrupt at bit {bit}.")]
    CorruptBody { bit: u64 },

    /// The input has been changed between the two passes of compression.
    #[error("Input changed during compression.")]
    InputChanged,

    /// The input is too long for the lengths of its codes to be summed up in 64 bits.
    #[error("Input is too large.")]
    InputTooLarge,

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error)
}

impl From<TreeError> for Error {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::ZeroSymbols => Error::ZeroSymbolFrequencyTable,
            TreeError::FrequencyOverflow => Error::corrupt_header(e.to_string())
        }
    }
}

impl Error {
    /// Constructs [`Error::CorruptHeader`] with given `message`.
    pub(crate) fn corrupt_header(message: impl Into<String>) -> Self {
        Error::CorruptHeader(message.into())
    }
}
