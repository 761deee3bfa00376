use std::io::{self, ErrorKind, Read};

use crate::BITS_PER_BYTE;

/// Reads single bits from the underlying `input`, the most significant bit of each byte first.
///
/// Bytes are fetched from `input` to an internal buffer, as many as fit in a single `read` call.
pub struct BitReader<R: Read> {
    input: R,
    buffer: Box<[u8]>,
    /// Index of the next unused byte in `buffer`.
    pos: usize,
    /// Number of valid bytes in `buffer`.
    filled: usize,
    /// Byte whose bits are being read.
    current: u8,
    /// Number of unread bits of `current`.
    remaining: u8,
    /// Number of bits returned or skipped so far.
    bits_read: u64
}

impl<R: Read> BitReader<R> {
    /// Default capacity (in bytes) of the internal buffer.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Constructs reader from `input` with the buffer of [`Self::DEFAULT_CAPACITY`] bytes.
    pub fn new(input: R) -> Self {
        Self::with_capacity(input, Self::DEFAULT_CAPACITY)
    }

    /// Constructs reader from `input` with the buffer of `capacity` bytes (at least 1).
    pub fn with_capacity(input: R, capacity: usize) -> Self {
        Self {
            input,
            buffer: vec![0u8; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            current: 0,
            remaining: 0,
            bits_read: 0
        }
    }

    /// Fills the buffer with the next bytes of input. Returns `false` at the end of the input.
    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.input.read(&mut self.buffer) {
                Ok(read) => {
                    self.pos = 0;
                    self.filled = read;
                    return Ok(read != 0);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e)
            }
        }
    }

    /// Makes sure that `current` has unread bits. Returns `false` at the end of the input.
    #[inline] fn ensure_current(&mut self) -> io::Result<bool> {
        if self.remaining == 0 {
            if self.pos == self.filled && !self.refill()? { return Ok(false); }
            self.current = self.buffer[self.pos];
            self.pos += 1;
            self.remaining = BITS_PER_BYTE;
        }
        Ok(true)
    }

    /// Returns the next bit, or `None` if the input is exhausted.
    #[inline] pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if !self.ensure_current()? { return Ok(None); }
        self.remaining -= 1;
        self.bits_read += 1;
        Ok(Some((self.current >> self.remaining) & 1 == 1))
    }

    /// Skips the unread bits of the current byte and returns their number (in range *[0, 7]*).
    pub fn skip_to_byte_boundary(&mut self) -> u8 {
        let skipped = self.remaining;
        self.bits_read += skipped as u64;
        self.remaining = 0;
        skipped
    }

    /// Returns whether there are no more bits to read.
    pub fn is_exhausted(&mut self) -> io::Result<bool> {
        self.ensure_current().map(|has_bits| !has_bits)
    }

    /// Returns the number of bits read (or skipped) since construction.
    #[inline] pub fn bits_read(&self) -> u64 { self.bits_read }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all<R: Read>(reader: &mut BitReader<R>) -> Vec<bool> {
        let mut result = Vec::new();
        while let Some(bit) = reader.read_bit().unwrap() { result.push(bit); }
        result
    }

    #[test]
    fn msb_first() {
        let mut r = BitReader::new(&[0b1010_0001u8, 0b1100_0000][..]);
        let bits = read_all(&mut r);
        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[..10], [true, false, true, false, false, false, false, true, true, true]);
        assert!(bits[10..].iter().all(|b| !b));
        assert_eq!(r.bits_read(), 16);
        assert_eq!(r.read_bit().unwrap(), None);
    }

    #[test]
    fn empty_input() {
        let mut r = BitReader::new(&[0u8; 0][..]);
        assert!(r.is_exhausted().unwrap());
        assert_eq!(r.read_bit().unwrap(), None);
        assert_eq!(r.bits_read(), 0);
    }

    #[test]
    fn buffer_size_does_not_matter() {
        let input: Vec<u8> = (0..=255).collect();
        let expected = read_all(&mut BitReader::new(&input[..]));
        for capacity in [0, 1, 2, 3, 7, 255, 256, 1000] {
            assert_eq!(read_all(&mut BitReader::with_capacity(&input[..], capacity)), expected);
        }
    }

    #[test]
    fn skip_to_byte_boundary() {
        let mut r = BitReader::with_capacity(&[0b1000_0000u8, 0b0100_0000][..], 1);
        assert_eq!(r.skip_to_byte_boundary(), 0);
        assert_eq!(r.read_bit().unwrap(), Some(true));
        assert_eq!(r.skip_to_byte_boundary(), 7);
        assert_eq!(r.bits_read(), 8);
        assert!(!r.is_exhausted().unwrap());
        assert_eq!(r.bits_read(), 8);
        assert_eq!(r.read_bit().unwrap(), Some(false));
        assert_eq!(r.read_bit().unwrap(), Some(true));
        assert_eq!(r.skip_to_byte_boundary(), 6);
        assert!(r.is_exhausted().unwrap());
    }

    #[test]
    fn reads_what_writer_wrote() {
        let bits = [true, true, false, true, false, false, true, false, true, true, true];
        let mut w = crate::BitWriter::with_capacity(Vec::new(), 1);
        for bit in bits { w.write_bit(bit as u8).unwrap(); }
        let (bytes, meaningful) = w.finish().unwrap();
        assert_eq!(meaningful, 3);
        let mut r = BitReader::with_capacity(&bytes[..], 1);
        for expected in bits { assert_eq!(r.read_bit().unwrap(), Some(expected)); }
        assert_eq!(r.skip_to_byte_boundary(), 5);
        assert_eq!(r.read_bit().unwrap(), None);
    }
}
