//! Huffman tree construction.
//!
//! The tree is built greedily: every distinct symbol starts as a leaf in a
//! min-heap keyed by frequency, and the two lightest nodes are merged until a
//! single root remains. The tree only lives long enough to derive a
//! [`CodeTable`](crate::compression::codes::CodeTable) and is never stored in
//! an archive.

use crate::compression::frequency::FrequencyTable;
use crate::compression::Result;
use crate::error::Error;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a character and its frequency.
    Leaf { ch: char, freq: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A helper wrapper for HuffmanNode for use in a BinaryHeap.
///
/// The node with the smallest frequency has the highest priority. Equal
/// frequencies are ordered by the smallest symbol in each subtree; subtrees in
/// the heap never share a symbol, so the order is total and the tree is the
/// same on every run.
#[derive(Debug)]
struct NodeWrapper {
    node: HuffmanNode,
    min_ch: char,
}

impl NodeWrapper {
    fn leaf(ch: char, freq: usize) -> Self {
        NodeWrapper {
            node: HuffmanNode::Leaf { ch, freq },
            min_ch: ch,
        }
    }

    fn merge(first: NodeWrapper, second: NodeWrapper) -> Self {
        NodeWrapper {
            min_ch: first.min_ch.min(second.min_ch),
            node: HuffmanNode::merge(first.node, second.node),
        }
    }
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower frequency, then lower symbol, comes first.
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.min_ch.cmp(&self.min_ch))
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree given a frequency table.
///
/// The first node popped in each round becomes the left child of the merged
/// node. A table with a single symbol yields that symbol's leaf as the root.
/// Fails with [`Error::EmptyInput`] if the table is empty.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Result<HuffmanNode> {
    let mut heap: BinaryHeap<NodeWrapper> = freq_table
        .iter()
        .map(|(ch, freq)| NodeWrapper::leaf(ch, freq))
        .collect();

    // Combine nodes until only one tree remains.
    let root = loop {
        let left = heap.pop().ok_or(Error::EmptyInput)?;
        match heap.pop() {
            Some(right) => heap.push(NodeWrapper::merge(left, right)),
            None => break left.node,
        }
    };

    log::debug!(
        "built huffman tree over {} symbols, root weight {}",
        root.leaf_count(),
        root.freq()
    );
    Ok(root)
}
