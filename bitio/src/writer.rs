use std::io::{self, Write};

use crate::BITS_PER_BYTE;

/// Writes single bits to the underlying `output`, the most significant bit of each byte first.
///
/// Bits are collected in an 8-bit accumulator. Each full accumulator is appended to
/// a byte buffer, which is passed to `output` when it reaches its capacity.
/// Nothing reaches `output` until a buffer boundary is crossed or
/// [`flush_buffer`](Self::flush_buffer) (or [`finish`](Self::finish)) is called.
///
/// Note that bits and bytes that are still buffered when the writer is dropped are lost.
pub struct BitWriter<W: Write> {
    output: W,
    /// Bits collected so far, aligned to the most significant bit.
    acc: u8,
    /// Number of bits in `acc`, always less than 8.
    acc_len: u8,
    /// Whole bytes waiting to be written to `output`.
    buffer: Vec<u8>,
    /// Number of bytes that `buffer` can hold before it is flushed.
    capacity: usize,
    /// Number of bits passed to `write_bit` so far.
    bits_written: u64
}

impl<W: Write> BitWriter<W> {
    /// Default capacity (in bytes) of the internal buffer.
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    /// Constructs writer to `output` with the buffer of [`Self::DEFAULT_CAPACITY`] bytes.
    pub fn new(output: W) -> Self {
        Self::with_capacity(output, Self::DEFAULT_CAPACITY)
    }

    /// Constructs writer to `output` with the buffer of `capacity` bytes (at least 1).
    pub fn with_capacity(output: W, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { output, acc: 0, acc_len: 0, buffer: Vec::with_capacity(capacity), capacity, bits_written: 0 }
    }

    /// Appends the lowest bit of `bit` (other bits are ignored).
    #[inline] pub fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        self.acc |= (bit & 1) << (BITS_PER_BYTE - 1 - self.acc_len);
        self.acc_len += 1;
        self.bits_written += 1;
        if self.acc_len == BITS_PER_BYTE { self.push_acc() } else { Ok(()) }
    }

    /// Appends the `len` lowest bits of `value`, the most significant of them first.
    /// Bits beyond the 128 bits of `value` are zeros.
    pub fn write_bits(&mut self, value: u128, len: u8) -> io::Result<()> {
        let mut remaining = len;
        while remaining != 0 {
            let free = BITS_PER_BYTE - self.acc_len;
            let take = free.min(remaining);
            remaining -= take;
            let chunk = value.checked_shr(remaining as u32).unwrap_or(0) as u8 & (((1u16 << take) - 1) as u8);
            self.acc |= chunk << (free - take);
            self.acc_len += take;
            self.bits_written += take as u64;
            if self.acc_len == BITS_PER_BYTE { self.push_acc()?; }
        }
        Ok(())
    }

    /// Moves the accumulator to the buffer and flushes the buffer if it is full.
    fn push_acc(&mut self) -> io::Result<()> {
        self.buffer.push(self.acc);
        self.acc = 0;
        self.acc_len = 0;
        if self.buffer.len() >= self.capacity { self.flush_buffer() } else { Ok(()) }
    }

    /// Moves partially filled accumulator (if any) to the buffer as a byte whose unused, low bits are zeroed.
    /// Returns the number of meaningful bits in that byte, or `0` if the accumulator was empty.
    pub fn flush_partial_byte(&mut self) -> io::Result<u8> {
        let meaningful = self.acc_len;
        if meaningful != 0 { self.push_acc()?; }
        Ok(meaningful)
    }

    /// Writes all buffered whole bytes to the output. The accumulator is left untouched.
    pub fn flush_buffer(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            self.output.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    /// Returns the number of bits written since construction.
    #[inline] pub fn bits_written(&self) -> u64 { self.bits_written }

    /// Returns the number of bits in the accumulator, which do not form a whole byte yet.
    #[inline] pub fn pending_bits(&self) -> u8 { self.acc_len }

    /// Returns a reference to the underlying output.
    #[inline] pub fn get_ref(&self) -> &W { &self.output }

    /// Flushes the partial byte, the buffer and the output, and returns the output
    /// together with the number of meaningful bits in the last byte (see [`Self::flush_partial_byte`]).
    pub fn finish(mut self) -> io::Result<(W, u8)> {
        let meaningful = self.flush_partial_byte()?;
        self.flush_buffer()?;
        self.output.flush()?;
        Ok((self.output, meaningful))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first() {
        let mut w = BitWriter::new(Vec::new());
        for bit in [1, 0, 1, 0, 0, 0, 0, 1,  1, 1] { w.write_bit(bit).unwrap(); }
        assert_eq!(w.bits_written(), 10);
        assert_eq!(w.pending_bits(), 2);
        let (out, meaningful) = w.finish().unwrap();
        assert_eq!(out, vec![0b1010_0001, 0b1100_0000]);
        assert_eq!(meaningful, 2);
    }

    #[test]
    fn only_lowest_bit_counts() {
        let mut w = BitWriter::new(Vec::new());
        for bit in [0b10, 0b11, 0xFE, 0xFF] { w.write_bit(bit).unwrap(); }
        assert_eq!(w.finish().unwrap(), (vec![0b0101_0000], 4));
    }

    #[test]
    fn nothing_reaches_output_before_flush() {
        let mut w = BitWriter::with_capacity(Vec::new(), 4);
        w.write_bits(0xFF_FFFF, 24).unwrap();
        assert!(w.get_ref().is_empty());
        w.write_bits(0, 8).unwrap();  // fourth byte fills the buffer
        assert_eq!(w.get_ref(), &vec![0xFF, 0xFF, 0xFF, 0x00]);
        w.write_bits(0b11, 2).unwrap();
        assert_eq!(w.get_ref().len(), 4);
    }

    #[test]
    fn flush_partial_byte() {
        let mut w = BitWriter::with_capacity(Vec::new(), 1);
        assert_eq!(w.flush_partial_byte().unwrap(), 0);
        assert!(w.get_ref().is_empty());
        w.write_bits(0b111, 3).unwrap();
        assert_eq!(w.flush_partial_byte().unwrap(), 3);
        assert_eq!(w.get_ref(), &vec![0b1110_0000]);
        assert_eq!(w.flush_partial_byte().unwrap(), 0);
        assert_eq!(w.get_ref().len(), 1);
    }

    #[test]
    fn flush_buffer_keeps_accumulator() {
        let mut w = BitWriter::with_capacity(Vec::new(), 100);
        w.write_bits(0xFFF, 12).unwrap();
        w.flush_buffer().unwrap();
        assert_eq!(w.get_ref(), &vec![0xFF]);
        assert_eq!(w.pending_bits(), 4);
        assert_eq!(w.finish().unwrap(), (vec![0xFF, 0xF0], 4));
    }

    #[test]
    fn full_last_byte() {
        let mut w = BitWriter::new(Vec::new());
        w.write_bits(0, 16).unwrap();
        assert_eq!(w.finish().unwrap(), (vec![0, 0], 0));
    }

    #[test]
    fn bits_of_value() {
        let mut w = BitWriter::new(Vec::new());
        w.write_bit(1).unwrap();
        w.write_bits(0b1111_0000_1010, 12).unwrap();
        w.write_bits(0b10, 1).unwrap();  // only the lowest bit is written
        assert_eq!(w.bits_written(), 14);
        assert_eq!(w.finish().unwrap(), (vec![0b1111_1000, 0b0101_0000], 6));
    }

    #[test]
    fn long_value() {
        let mut w = BitWriter::new(Vec::new());
        w.write_bits(0b101, 3).unwrap();
        w.write_bits(u128::MAX - 1, 128).unwrap();
        w.write_bits(1, 130).unwrap();  // two leading zeros
        let (out, meaningful) = w.finish().unwrap();
        // 261 bits
        assert_eq!(meaningful, 5);
        assert_eq!(out.len(), 33);
        assert_eq!(out[0], 0b1011_1111);
        assert!(out[1..16].iter().all(|b| *b == 0xFF));
        assert_eq!(out[16], 0b1100_0000);
        assert!(out[17..32].iter().all(|b| *b == 0));
        assert_eq!(out[32], 0b0000_1000);
    }
}
