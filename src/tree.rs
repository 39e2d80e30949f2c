use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::frequency::FrequencyTable;

/// A node of a strict binary prefix tree. Internal nodes always own two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(u8),
    Internal(Box<Node>, Box<Node>),
}

impl Node {
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf(byte) => Some(*byte),
            Node::Internal(..) => None,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Internal(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Huffman tree for one encode or decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

// Heap entry; `seq` orders equal weights by insertion so builds are reproducible.
#[derive(Debug)]
struct QueueEntry {
    weight: u64,
    seq: usize,
    node: Node,
}

impl Eq for QueueEntry {}
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lightest, oldest entry first
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HuffmanTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves enter the queue in ascending byte order and each merged node gets
    /// the next sequence number; among equal weights the lower sequence number
    /// is extracted first and becomes the left child. Returns `None` when the
    /// table is empty. A table with one symbol yields a tree whose root is a leaf.
    pub fn build(freqs: &FrequencyTable) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(freqs.distinct());
        let mut seq = 0;
        for (byte, count) in freqs.iter() {
            heap.push(QueueEntry {
                weight: count,
                seq,
                node: Node::Leaf(byte),
            });
            seq += 1;
        }

        loop {
            let left = heap.pop()?;
            let Some(right) = heap.pop() else {
                let tree = HuffmanTree::new(left.node);
                trace!(
                    leaves = tree.leaf_count(),
                    depth = tree.depth(),
                    "huffman tree built"
                );
                return Some(tree);
            };
            heap.push(QueueEntry {
                weight: left.weight + right.weight,
                seq,
                node: Node::internal(left.node, right.node),
            });
            seq += 1;
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted_path_length(node: &Node, freqs: &FrequencyTable, depth: u64) -> u64 {
        match node {
            Node::Leaf(byte) => freqs.count(*byte) * depth,
            Node::Internal(left, right) => {
                weighted_path_length(left, freqs, depth + 1)
                    + weighted_path_length(right, freqs, depth + 1)
            }
        }
    }

    fn leaves(node: &Node, out: &mut Vec<u8>) {
        match node {
            Node::Leaf(byte) => out.push(*byte),
            Node::Internal(left, right) => {
                leaves(left, out);
                leaves(right, out);
            }
        }
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(HuffmanTree::from_bytes(&[]).is_none());
    }

    #[test]
    fn single_symbol_root_is_leaf() {
        let tree = HuffmanTree::from_bytes(b"zzzz").unwrap();
        assert_eq!(tree.root(), &Node::Leaf(b'z'));
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn lighter_node_goes_left() {
        let tree = HuffmanTree::from_bytes(b"aaab").unwrap();
        assert_eq!(tree.root(), &Node::internal(Node::Leaf(b'b'), Node::Leaf(b'a')));
    }

    #[test]
    fn equal_weights_follow_insertion_order() {
        let tree = HuffmanTree::from_bytes(b"dcba").unwrap();
        let expected = Node::internal(
            Node::internal(Node::Leaf(b'a'), Node::Leaf(b'b')),
            Node::internal(Node::Leaf(b'c'), Node::Leaf(b'd')),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn leaves_are_exactly_the_present_symbols() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let freqs = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::build(&freqs).unwrap();

        let mut found = Vec::new();
        leaves(tree.root(), &mut found);
        found.sort_unstable();
        let expected: Vec<u8> = freqs.iter().map(|(byte, _)| byte).collect();
        assert_eq!(found, expected);
        assert_eq!(tree.leaf_count(), freqs.distinct());
    }

    #[test]
    fn produces_optimal_cost() {
        // Textbook distribution with a known optimal cost of 224.
        let mut data = Vec::new();
        let counts = [(b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45)];
        for (byte, count) in counts {
            data.extend(std::iter::repeat_n(byte, count));
        }
        let freqs = FrequencyTable::from_bytes(&data);
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(weighted_path_length(tree.root(), &freqs, 0), 224);
    }

    #[test]
    fn build_is_deterministic() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 97) as u8).collect();
        assert_eq!(HuffmanTree::from_bytes(&data), HuffmanTree::from_bytes(&data));
    }
}
