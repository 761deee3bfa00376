#![doc = include_str!("../README.md")]

mod writer;
pub use writer::BitWriter;
mod reader;
pub use reader::BitReader;

/// Number of bits in a byte.
pub const BITS_PER_BYTE: u8 = 8;

/// Returns the number of filler bits needed to complete the last byte of `bits`-bit long content.
/// Result is in range *[0, 7]*.
///
/// # Example
///
/// ```
/// use bitio::padding_for;
///
/// assert_eq!(padding_for(0), 0);
/// assert_eq!(padding_for(5), 3);
/// assert_eq!(padding_for(16), 0);
/// ```
#[inline] pub const fn padding_for(bits: u64) -> u8 {
    match (bits % BITS_PER_BYTE as u64) as u8 {
        0 => 0,
        r => BITS_PER_BYTE - r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(1), 7);
        assert_eq!(padding_for(7), 1);
        assert_eq!(padding_for(8), 0);
        assert_eq!(padding_for(9), 7);
        assert_eq!(padding_for(u64::MAX), 1);
    }
}
