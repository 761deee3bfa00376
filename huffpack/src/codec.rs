//! Stream-level compression and decompression.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use bitio::{padding_for, BitReader, BitWriter, BITS_PER_BYTE};
use byte_huffman::{DecodingResult, Decoder, Frequencies, HuffmanTree};
use dyn_size_of::GetSize;
use tracing::{debug, info, warn};

use crate::{Error, FileHeader, Result, Ui};

/// Sizes of the buffers used by [`compress`] and [`decompress`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CodecOptions {
    /// Size (in bytes) of the buffer used to read input.
    pub read_buffer: usize,
    /// Size (in bytes) of the buffer used to write encoded bits.
    pub write_buffer: usize,
    /// Number of decoded bytes collected before they are written.
    pub chunk: usize
}

impl CodecOptions {
    pub const DEFAULT_READ_BUFFER: usize = 16 * 1024 * 1024;
    pub const DEFAULT_WRITE_BUFFER: usize = 8 * 1024 * 1024;
    pub const DEFAULT_CHUNK: usize = 16 * 1024 * 1024;
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            read_buffer: Self::DEFAULT_READ_BUFFER,
            write_buffer: Self::DEFAULT_WRITE_BUFFER,
            chunk: Self::DEFAULT_CHUNK
        }
    }
}

/// Summary of a single compression or decompression.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    /// Number of bytes consumed from input (not counting ignored trailing data).
    pub input_bytes: u64,
    /// Number of bytes written to output.
    pub output_bytes: u64,
    /// Number of distinct bytes in uncompressed data.
    pub unique_symbols: u16,
    /// Number of filler bits in the last byte of compressed data.
    pub padding: u8
}

/// Compresses `input`, from its current position to its end, to `output`.
///
/// The input is read twice: first to count its bytes, then (after seeking back) to encode them.
/// Writes nothing if `input` is empty.
/// Fails with [`Error::InputChanged`] if the two passes see different data.
pub fn compress<R, W>(input: &mut R, output: &mut W, options: &CodecOptions, ui: &dyn Ui) -> Result<Stats>
    where R: Read + Seek + ?Sized, W: Write + ?Sized
{
    let start = input.stream_position()?;
    ui.write_message("Counting byte frequency...");
    let mut frequencies = Frequencies::new();
    let input_bytes = frequencies.count_from(&mut *input, options.read_buffer)?;
    if input_bytes == 0 {
        debug!("input is empty, nothing to compress");
        return Ok(Stats::default());
    }
    ui.write_message("Finished counting bytes.");

    ui.write_message("Building huffman tree...");
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codebook = tree.codebook();
    let body_bits = frequencies.total_code_bits(&codebook).ok_or(Error::InputTooLarge)?;
    debug!(
        input_bytes,
        unique = tree.leaves_count(),
        tree_size = tree.size_bytes(),
        codebook_size = codebook.size_bytes(),
        max_code_len = codebook.max_len(),
        entropy = frequencies.entropy(),
        bits_per_byte = body_bits as f64 / input_bytes as f64,
        "huffman tree built"
    );
    ui.write_message("Tree created, and codes generated.");

    ui.write_message("Writing file header...");
    let header = FileHeader::new(frequencies, padding_for(body_bits));
    let mut header_bytes = Vec::with_capacity(header.size_bytes());
    header.write(&mut header_bytes)?;
    output.write_all(&header_bytes)?;
    ui.write_message("File header written.");

    ui.write_message("Encoding bytes...");
    input.seek(SeekFrom::Start(start))?;
    let mut writer = BitWriter::with_capacity(&mut *output, options.write_buffer);
    let mut buffer = vec![0u8; options.read_buffer.max(1)];
    let mut encoded_bytes = 0u64;
    loop {
        let read = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into())
        };
        encoded_bytes += read as u64;
        if encoded_bytes > input_bytes { return Err(Error::InputChanged); }
        for &byte in &buffer[..read] {
            let code = &codebook[byte];
            if code.is_empty() { return Err(Error::InputChanged); }
            writer.write_bits(code.bits, code.len)?;
        }
    }
    let written_bits = writer.bits_written();
    writer.finish()?;
    if encoded_bytes != input_bytes || written_bits != body_bits {
        return Err(Error::InputChanged);
    }

    let stats = Stats {
        input_bytes,
        output_bytes: header_bytes.len() as u64 + body_bits.div_ceil(BITS_PER_BYTE as u64),
        unique_symbols: header.unique_count(),
        padding: header.padding
    };
    info!(?stats, "compression finished");
    Ok(stats)
}

/// Buffers decoded bytes and writes them to `output` in chunks.
struct ChunkedOutput<'w, W: Write + ?Sized> {
    output: &'w mut W,
    buffer: Vec<u8>,
    chunk: usize,
    written: u64
}

impl<'w, W: Write + ?Sized> ChunkedOutput<'w, W> {
    fn new(output: &'w mut W, chunk: usize, expected: u64) -> Self {
        let chunk = chunk.max(1);
        let capacity = usize::try_from(expected).map_or(chunk, |expected| expected.min(chunk));
        Self { output, buffer: Vec::with_capacity(capacity), chunk, written: 0 }
    }

    #[inline] fn push(&mut self, byte: u8) -> std::io::Result<()> {
        self.buffer.push(byte);
        if self.buffer.len() >= self.chunk { self.flush() } else { Ok(()) }
    }

    /// Number of bytes pushed so far.
    #[inline] fn len(&self) -> u64 { self.written + self.buffer.len() as u64 }

    fn flush(&mut self) -> std::io::Result<()> {
        self.output.write_all(&self.buffer)?;
        self.written += self.buffer.len() as u64;
        self.buffer.clear();
        self.output.flush()
    }
}

/// Decodes `body_bits` bits read by `reader` and pushes the decoded bytes to `output`.
fn decode_body<R, W>(decoder: &mut Decoder<'_>, reader: &mut BitReader<R>, body_bits: u64, expected: u64,
                     output: &mut ChunkedOutput<'_, W>) -> Result<()>
    where R: Read, W: Write + ?Sized
{
    while reader.bits_read() < body_bits {
        let Some(bit) = reader.read_bit()? else {
            return Err(Error::TruncatedBody { decoded: output.len(), expected });
        };
        match decoder.consume(bit) {
            DecodingResult::Value(byte) => output.push(byte)?,
            DecodingResult::Incomplete => {},
            DecodingResult::Invalid => return Err(Error::CorruptBody { bit: reader.bits_read() - 1 })
        }
    }
    if !decoder.is_at_root() || output.len() != expected {
        return Err(Error::CorruptBody { bit: body_bits });
    }
    Ok(())
}

/// Decompresses `input` (produced by [`compress`]) to `output`.
///
/// The number of encoded bits is derived from the frequencies stored in the header
/// and exactly that many bits are decoded; the padding bits and any following data are ignored.
/// Writes nothing if `input` is empty.
/// Bytes decoded before an error is detected are still written to `output`.
pub fn decompress<R, W>(input: &mut R, output: &mut W, options: &CodecOptions, ui: &dyn Ui) -> Result<Stats>
    where R: Read + ?Sized, W: Write + ?Sized
{
    ui.write_message("Reading file header and rebuilding tree...");
    let Some(header) = FileHeader::read(&mut *input)? else {
        debug!("input is empty, nothing to decompress");
        return Ok(Stats::default());
    };
    let tree = HuffmanTree::from_frequencies(&header.frequencies)?;
    let codebook = tree.codebook();
    let expected = header.frequencies.total()
        .ok_or_else(|| Error::corrupt_header("sum of frequencies exceeds 64 bits"))?;
    let body_bits = header.frequencies.total_code_bits(&codebook)
        .ok_or_else(|| Error::corrupt_header("number of encoded bits exceeds 64 bits"))?;
    if padding_for(body_bits) != header.padding {
        return Err(Error::corrupt_header(format!(
            "padding of {} bits does not match {body_bits} encoded bits", header.padding)));
    }
    debug!(
        expected,
        body_bits,
        unique = tree.leaves_count(),
        tree_size = tree.size_bytes(),
        max_code_len = codebook.max_len(),
        "huffman tree rebuilt"
    );
    ui.write_message("Tree created.");

    ui.write_message("Transforming bytes...");
    let mut reader = BitReader::with_capacity(&mut *input, options.read_buffer);
    let mut decoded = ChunkedOutput::new(output, options.chunk, expected);
    let result = decode_body(&mut tree.decoder(), &mut reader, body_bits, expected, &mut decoded);
    let flushed = decoded.flush();
    result?;
    flushed?;

    reader.skip_to_byte_boundary();
    if !reader.is_exhausted()? {
        warn!("ignoring data that follow {body_bits} encoded bits");
    }

    let stats = Stats {
        input_bytes: header.size_bytes() as u64 + body_bits.div_ceil(BITS_PER_BYTE as u64),
        output_bytes: decoded.written,
        unique_symbols: header.unique_count(),
        padding: header.padding
    };
    info!(?stats, "decompression finished");
    Ok(stats)
}
