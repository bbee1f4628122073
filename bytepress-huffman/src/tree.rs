//! Huffman tree construction over an index arena.
//!
//! Nodes live in one flat vector. Slots `0..256` are leaves whose index is
//! the byte value they stand for; internal nodes are appended from index 256
//! onward and never removed.
//!
//! # Tie-breaking
//!
//! The build queue is a min-heap keyed on `(weight, index)`. Leaves enter in
//! ascending byte order and internal nodes receive increasing indices as they
//! are created, so the index doubles as insertion order: among equal weights
//! the node inserted first is popped first. Encoder and decoder therefore
//! always build the same tree from the same table.

use bytepress_core::frequency::{FrequencyTable, SYMBOL_COUNT};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Sum of the weights of all leaves under this node.
    pub weight: u32,
    /// Left child index (edge labelled `0`).
    pub left: Option<usize>,
    /// Right child index (edge labelled `1`).
    pub right: Option<usize>,
}

impl Node {
    fn leaf(weight: u32) -> Self {
        Self {
            weight,
            left: None,
            right: None,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }
}

/// Huffman tree stored as an index arena.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Returns `None` when no symbol has a nonzero weight.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<Node> = Vec::with_capacity(SYMBOL_COUNT * 2);
        nodes.extend(table.weights().iter().map(|&w| Node::leaf(w as u32)));

        let mut heap: BinaryHeap<Reverse<(u32, usize)>> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.weight > 0)
            .map(|(index, node)| Reverse((node.weight, index)))
            .collect();

        while heap.len() > 1 {
            let Reverse((left_weight, left)) = heap.pop()?;
            let Reverse((right_weight, right)) = heap.pop()?;

            let weight = left_weight + right_weight;
            nodes.push(Node {
                weight,
                left: Some(left),
                right: Some(right),
            });
            heap.push(Reverse((weight, nodes.len() - 1)));
        }

        let Reverse((_, root)) = heap.pop()?;
        Some(Self { nodes, root })
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Node at `index`.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// All nodes, leaves first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of internal nodes appended during construction.
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - SYMBOL_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, u8)]) -> FrequencyTable {
        let mut weights = [0u8; SYMBOL_COUNT];
        for &(byte, weight) in pairs {
            weights[byte as usize] = weight;
        }
        FrequencyTable::from_weights(weights)
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(HuffmanTree::build(&FrequencyTable::from_weights([0; SYMBOL_COUNT])).is_none());
    }

    #[test]
    fn test_single_leaf_root() {
        let tree = HuffmanTree::build(&table(&[(b'A', 7)])).unwrap();
        assert_eq!(tree.root(), b'A' as usize);
        assert!(tree.node(tree.root()).is_leaf());
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn test_root_weight_is_total() {
        let tree = HuffmanTree::build(&table(&[(1, 5), (2, 9), (3, 12), (4, 13)])).unwrap();
        assert_eq!(tree.node(tree.root()).weight, 39);
        assert_eq!(tree.internal_count(), 3);
        assert_eq!(tree.root(), SYMBOL_COUNT + 2);
    }

    #[test]
    fn test_equal_weights_pop_in_insertion_order() {
        // All weights equal: the two lowest byte values pair first.
        let tree = HuffmanTree::build(&table(&[(10, 1), (20, 1), (30, 1)])).unwrap();

        let first = tree.node(SYMBOL_COUNT);
        assert_eq!(first.left, Some(10));
        assert_eq!(first.right, Some(20));

        // Weight-1 leaf (30) is popped before the weight-2 internal node.
        let second = tree.node(SYMBOL_COUNT + 1);
        assert_eq!(second.left, Some(30));
        assert_eq!(second.right, Some(SYMBOL_COUNT));
    }

    #[test]
    fn test_leaf_beats_internal_node_of_equal_weight() {
        // 1+1 = 2 ties with leaf 3 (weight 2); the leaf has the lower index.
        let tree = HuffmanTree::build(&table(&[(1, 1), (2, 1), (3, 2)])).unwrap();
        let top = tree.node(tree.root());
        assert_eq!(top.left, Some(3));
        assert_eq!(top.right, Some(SYMBOL_COUNT));
    }

    #[test]
    fn test_build_is_reproducible() {
        let t = FrequencyTable::from_data(b"abracadabra alakazam");
        let a = HuffmanTree::build(&t).unwrap();
        let b = HuffmanTree::build(&t).unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.root(), b.root());
    }
}
