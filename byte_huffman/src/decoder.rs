use crate::{DecodingResult, HuffmanTree, Node};

/// Decoder that decodes bytes from codewords, consuming one bit at a time.
///
/// Each decoder has its own position in the tree,
/// so many decoders can independently walk the same tree.
///
/// Time complexity of decoding a byte is *O(length of its code)*.
pub struct Decoder<'tree> {
    tree: &'tree HuffmanTree,
    /// Index of the current node, the root if no bit of the current codeword has been consumed.
    current: usize
}

impl<'tree> Decoder<'tree> {
    /// Constructs decoder for given `tree`.
    #[inline] pub fn new(tree: &'tree HuffmanTree) -> Self {
        Self { tree, current: tree.root() }
    }

    /// Resets `self` to the root, making it ready to decode next value.
    #[inline] pub fn reset(&mut self) { self.current = self.tree.root(); }

    /// Returns whether `self` is at the root, i.e. no bit of an unfinished codeword has been consumed.
    #[inline] pub fn is_at_root(&self) -> bool { self.current == self.tree.root() }

    /// Consumes a `bit` of the codeword and returns:
    /// - a value if the given `bit` finishes the codeword (the decoder is then [reset](Self::reset));
    /// - [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed;
    /// - or [`DecodingResult::Invalid`] if the codeword is invalid
    ///   (possible only for `true` bit in a tree of a single symbol). The position is not changed then.
    pub fn consume(&mut self, bit: bool) -> DecodingResult<u8> {
        let Some(next) = self.tree.child(self.current, bit) else {
            return DecodingResult::Invalid;
        };
        match *self.tree.node(next) {
            Node::Leaf { byte, .. } => {
                self.reset();
                DecodingResult::Value(byte)
            }
            Node::Internal { .. } => {
                self.current = next;
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single value from the `bits` iterator, consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the value was decoded
    /// ([`Self::is_at_root`] enables checking if the iterator yielded any bit of the codeword before exhausting).
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<u8> {
        for bit in bits {
            match self.consume(bit) {
                DecodingResult::Incomplete => {}
                result => return result
            }
        }
        DecodingResult::Incomplete
    }
}
