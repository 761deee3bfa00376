//! Counting occurrences of bytes.

use std::borrow::Borrow;
use std::io::{self, ErrorKind, Read};
use fsum::FSum;

use crate::{Codebook, SYMBOLS};

/// Numbers of occurrences of all 256 byte values.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frequencies([u64; SYMBOLS]);

impl Default for Frequencies {
    #[inline] fn default() -> Self { Self([0; SYMBOLS]) }
}

impl Frequencies {
    /// Constructs `Self` with all counts equal to zero.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs `Self` that counts occurrences of all bytes exposed by `iter`.
    pub fn with_counted_all<Iter>(iter: Iter) -> Self
        where Iter: IntoIterator, Iter::Item: Borrow<u8>
    {
        let mut result = Self::default();
        result.count_all(iter);
        result
    }

    /// Adds one to the stored number of `byte` occurrences.
    #[inline] pub fn count(&mut self, byte: u8) {
        self.0[byte as usize] += 1;
    }

    /// Calls `count` for all bytes exposed by `iter`.
    pub fn count_all<Iter>(&mut self, iter: Iter) where Iter: IntoIterator, Iter::Item: Borrow<u8> {
        for b in iter { self.count(*b.borrow()); }
    }

    /// Counts all bytes read from `input` (up to its end), reading at most `buffer_size` bytes at once.
    /// Returns the number of bytes read.
    pub fn count_from<R: Read + ?Sized>(&mut self, input: &mut R, buffer_size: usize) -> io::Result<u64> {
        let mut buffer = vec![0u8; buffer_size.max(1)];
        let mut total = 0u64;
        loop {
            match input.read(&mut buffer) {
                Ok(0) => return Ok(total),
                Ok(read) => {
                    self.count_all(&buffer[..read]);
                    total += read as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e)
            }
        }
    }

    /// Returns the number of `byte` occurrences.
    #[inline] pub fn get(&self, byte: u8) -> u64 { self.0[byte as usize] }

    /// Sets the number of `byte` occurrences to `count`.
    #[inline] pub fn set(&mut self, byte: u8, count: u64) { self.0[byte as usize] = count; }

    /// Returns the number of bytes that occur at least once (in range *[0, 256]*).
    pub fn unique_count(&self) -> u16 {
        self.0.iter().filter(|c| **c != 0).count() as u16
    }

    /// Returns whether no byte has been counted.
    #[inline] pub fn is_empty(&self) -> bool { self.0.iter().all(|c| *c == 0) }

    /// Returns the sum of all counts, or `None` if it does not fit in `u64`.
    pub fn total(&self) -> Option<u64> {
        self.0.iter().try_fold(0u64, |acc, c| acc.checked_add(*c))
    }

    /// Returns iterator over `(byte, count)` pairs with non-zero counts, in ascending order of bytes.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0.iter().enumerate().filter(|(_, c)| **c != 0).map(|(b, c)| (b as u8, *c))
    }

    /// Returns the Shannon entropy (in bits per byte) of the bytes counted so far.
    pub fn entropy(&self) -> f64 {
        let sum = self.0.iter().map(|c| *c as f64).sum::<f64>();
        if sum == 0.0 { return 0.0; }
        - FSum::with_all(self.iter_nonzero()
            .map(|(_, c)| { let p = c as f64 / sum; p * p.log2() })).value()
    }

    /// Returns the total length, in bits, of the codes (given by `codebook`) of all counted bytes,
    /// or `None` if it does not fit in `u64`.
    pub fn total_code_bits(&self, codebook: &Codebook) -> Option<u64> {
        self.iter_nonzero().try_fold(0u64, |acc, (byte, count)|
            count.checked_mul(codebook[byte].len as u64).and_then(|bits| acc.checked_add(bits))
        )
    }
}

impl<B: Borrow<u8>> Extend<B> for Frequencies {
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) { self.count_all(iter) }
}

impl<B: Borrow<u8>> FromIterator<B> for Frequencies {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self { Self::with_counted_all(iter) }
}
