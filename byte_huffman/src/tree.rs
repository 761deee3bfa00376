use std::cmp::Reverse;
use std::collections::BinaryHeap;
use dyn_size_of::GetSize;

use crate::{Code, Codebook, Decoder, Frequencies, TreeError, SYMBOLS};

/// Node of the Huffman tree stored in the arena of [`HuffmanTree`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Node {
    /// Leaf that holds a byte value and its frequency.
    Leaf { byte: u8, freq: u64 },
    /// Internal node with the sum of children frequencies and indices of children in the arena.
    /// `right` is `None` only in the root of a tree built for a single symbol.
    Internal { freq: u64, left: usize, right: Option<usize> }
}

impl Node {
    /// Returns the frequency of `self`.
    #[inline] pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Node::Leaf { .. }) }
}

impl GetSize for Node {}

/// Node waiting in the priority queue during tree construction.
///
/// The derived order (fields compared in declaration order) is the tie-breaking rule:
/// lower frequency first, then leaves before internal nodes,
/// then smaller byte value of the leftmost leaf.
/// No two candidates are equal, since each byte is the leftmost leaf of at most one leaf and one internal node.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
struct Candidate {
    freq: u64,
    internal: bool,
    leftmost: u8,
    index: usize
}

/// Binary Huffman tree over bytes, stored in an arena.
///
/// Nodes are never shared and live as long as the tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HuffmanTree {
    /// All nodes, each child stored before its parent.
    nodes: Vec<Node>,
    /// Index of the root in `nodes`.
    root: usize
}

impl GetSize for HuffmanTree {
    fn size_bytes_dyn(&self) -> usize { self.nodes.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.nodes.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl HuffmanTree {
    /// Constructs the tree for given `frequencies`. Only bytes with non-zero frequency get leaves.
    ///
    /// The construction is deterministic (see [`Candidate`]) and the node that is removed
    /// from the queue first becomes the left child.
    /// If only one byte has non-zero frequency, the root has a single (left) child, which is the leaf of this byte.
    ///
    /// Returns [`TreeError::ZeroSymbols`] if all frequencies are zero
    /// and [`TreeError::FrequencyOverflow`] if their sum does not fit in `u64`.
    /// The latter guarantees that no code is longer than [`Code::MAX_LEN`].
    /// The algorithm runs in *O(n log n)* time, where *n* is the number of distinct bytes.
    pub fn from_frequencies(frequencies: &Frequencies) -> Result<Self, TreeError> {
        if frequencies.total().is_none() { return Err(TreeError::FrequencyOverflow); }
        let mut nodes = Vec::with_capacity(2 * SYMBOLS);
        let mut queue = BinaryHeap::with_capacity(SYMBOLS);
        for (byte, freq) in frequencies.iter_nonzero() {
            queue.push(Reverse(Candidate { freq, internal: false, leftmost: byte, index: nodes.len() }));
            nodes.push(Node::Leaf { byte, freq });
        }

        if queue.len() == 1 {
            if let Some(Reverse(only)) = queue.pop() {
                nodes.push(Node::Internal { freq: only.freq, left: only.index, right: None });
                return Ok(Self { root: nodes.len() - 1, nodes });
            }
        }

        while let Some(Reverse(left)) = queue.pop() {
            let Some(Reverse(right)) = queue.pop() else {
                return Ok(Self { nodes, root: left.index });
            };
            let freq = left.freq + right.freq;
            queue.push(Reverse(Candidate { freq, internal: true, leftmost: left.leftmost, index: nodes.len() }));
            nodes.push(Node::Internal { freq, left: left.index, right: Some(right.index) });
        }
        Err(TreeError::ZeroSymbols)
    }

    /// Returns index of the root.
    #[inline] pub fn root(&self) -> usize { self.root }

    /// Returns node with given `index`.
    #[inline] pub fn node(&self, index: usize) -> &Node { &self.nodes[index] }

    /// Returns all nodes of the tree.
    #[inline] pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the sum of frequencies of all leaves.
    #[inline] pub fn frequency(&self) -> u64 { self.nodes[self.root].freq() }

    /// Returns the number of leaves, i.e. the number of distinct coded bytes.
    pub fn leaves_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the child of the internal node with given `index`: the right one if `bit` is set, the left one otherwise.
    /// Returns `None` if there is no such child or `index` points to a leaf.
    #[inline] pub fn child(&self, index: usize, bit: bool) -> Option<usize> {
        match self.nodes[index] {
            Node::Internal { right, .. } if bit => right,
            Node::Internal { left, .. } => Some(left),
            Node::Leaf { .. } => None
        }
    }

    /// Returns the codes of all leaves, obtained by walking from the root
    /// and appending `0` for each left and `1` for each right descent.
    pub fn codebook(&self) -> Codebook {
        let mut codes = vec![Code::default(); SYMBOLS];
        let mut stack = vec![(self.root, Code::default())];
        while let Some((index, code)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf { byte, .. } => codes[byte as usize] = code,
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_code = code;
                        right_code.push(true);
                        stack.push((right, right_code));
                    }
                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((left, left_code));
                }
            }
        }
        Codebook::new(codes.into_boxed_slice())
    }

    /// Returns decoder that walks `self`.
    #[inline] pub fn decoder(&self) -> Decoder<'_> { Decoder::new(self) }
}
