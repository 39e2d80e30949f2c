use std::collections::BTreeMap;

use crate::tree::{HuffmanTree, Node};

/// Byte to bit-sequence mapping derived from the leaf paths of a tree.
///
/// `false` is a left turn (0), `true` a right turn (1). The sole symbol of a
/// single-leaf tree maps to the empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Vec<bool>>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        collect_codes(tree.root(), Vec::new(), &mut codes);
        Self { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&[bool]> {
        self.codes.get(&byte).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> {
        self.codes.iter().map(|(&byte, code)| (byte, code.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True when no code is a prefix of a different code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&[bool]> = self.codes.values().map(Vec::as_slice).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }
}

fn collect_codes(node: &Node, prefix: Vec<bool>, codes: &mut BTreeMap<u8, Vec<bool>>) {
    match node {
        Node::Leaf(byte) => {
            codes.insert(*byte, prefix);
        }
        Node::Internal(left, right) => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            collect_codes(left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            collect_codes(right, right_prefix, codes);
        }
    }
}

/// Renders a code as a string of `0`/`1` characters.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
