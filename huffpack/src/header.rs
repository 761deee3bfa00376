use std::io::{self, ErrorKind, Read, Write};
use binout::{AsIs, Serializer};
use bitio::BITS_PER_BYTE;
use byte_huffman::Frequencies;

use crate::{Error, Result};

/// Header of compressed data: the number of padding bits and frequencies of all bytes.
///
/// It fully determines the Huffman tree needed to decode the data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FileHeader {
    /// Number of filler bits at the end of the last byte of encoded data, in range *[0, 7]*.
    pub padding: u8,
    /// Numbers of occurrences of bytes in the uncompressed data.
    pub frequencies: Frequencies
}

impl FileHeader {
    /// Number of bytes preceding the list of frequencies.
    pub const PREFIX_BYTES: usize = 2;

    /// Number of bytes occupied by each `(byte, frequency)` pair.
    pub const ENTRY_BYTES: usize = 1 + std::mem::size_of::<u64>();

    /// Constructs header for given `frequencies` and `padding`.
    #[inline] pub fn new(frequencies: Frequencies, padding: u8) -> Self {
        Self { padding, frequencies }
    }

    /// Returns the number of bytes with non-zero frequencies.
    #[inline] pub fn unique_count(&self) -> u16 { self.frequencies.unique_count() }

    /// Returns number of bytes which `write` will write.
    #[inline] pub fn size_bytes(&self) -> usize {
        Self::PREFIX_BYTES + Self::ENTRY_BYTES * self.unique_count() as usize
    }

    /// Writes `self` to `output`: the number of distinct bytes minus one, padding,
    /// and `(byte, frequency)` pairs in ascending order of bytes.
    ///
    /// Fails with [`Error::ZeroSymbolFrequencyTable`] if all frequencies are zero.
    pub fn write<W: Write + ?Sized>(&self, output: &mut W) -> Result<()> {
        let unique = self.unique_count();
        if unique == 0 { return Err(Error::ZeroSymbolFrequencyTable); }
        AsIs::write(&mut *output, (unique - 1) as u8)?;
        AsIs::write(&mut *output, self.padding)?;
        for (byte, freq) in self.frequencies.iter_nonzero() {
            AsIs::write(&mut *output, byte)?;
            AsIs::write(&mut *output, freq)?;
        }
        Ok(())
    }

    /// Reads header (written by `write`) from `input`.
    ///
    /// Returns `None` if `input` is empty, and [`Error::CorruptHeader`] if it ends inside the header,
    /// lists some byte twice, or gives padding greater than 7.
    /// Bytes after the last `(byte, frequency)` pair are not read.
    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Option<Self>> {
        let mut prefix = [0u8; Self::PREFIX_BYTES];
        match read_up_to(&mut *input, &mut prefix)? {
            0 => return Ok(None),
            Self::PREFIX_BYTES => {},
            _ => return Err(Error::corrupt_header("file ends inside the header"))
        }
        let unique = prefix[0] as u16 + 1;
        let padding = prefix[1];
        if padding >= BITS_PER_BYTE {
            return Err(Error::corrupt_header(format!("padding of {padding} bits exceeds 7")));
        }
        let mut frequencies = Frequencies::new();
        let mut listed = [false; byte_huffman::SYMBOLS];
        for entry in 0..unique {
            let (byte, freq) = read_entry(&mut *input)
                .map_err(|e| if e.kind() == ErrorKind::UnexpectedEof {
                    Error::corrupt_header(format!("header declares {unique} bytes, but ends after {entry}"))
                } else {
                    e.into()
                })?;
            if std::mem::replace(&mut listed[byte as usize], true) {
                return Err(Error::corrupt_header(format!("byte {byte} is listed twice")));
            }
            frequencies.set(byte, freq);
        }
        Ok(Some(Self { padding, frequencies }))
    }
}

/// Reads a single `(byte, frequency)` pair.
fn read_entry<R: Read + ?Sized>(input: &mut R) -> io::Result<(u8, u64)> {
    Ok((<AsIs as Serializer<u8>>::read(&mut *input)?, <AsIs as Serializer<u64>>::read(&mut *input)?))
}

/// Reads from `input` until `buf` is full or the input ends. Returns the number of bytes read.
fn read_up_to<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e)
        }
    }
    Ok(filled)
}
