//! Pre-order serialization of tree shape and leaf symbols.
//!
//! Layout: every leaf is `LEAF_MARKER` followed by its symbol byte, every
//! internal node is `INTERNAL_MARKER` followed by its left then right subtree.
//! Weights are not stored; decoding only needs the paths.

use std::io::{self, Cursor, Read, Write};

use tracing::debug;

use crate::error::{HuffError, Result};
use crate::tree::{HuffmanTree, Node};

pub const LEAF_MARKER: u8 = b'1';
pub const INTERNAL_MARKER: u8 = b'0';

/// No tree over 256 symbols has more than 255 internal ancestors above a leaf.
pub const MAX_TREE_DEPTH: usize = 255;

pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    let mut out = Vec::new();
    serialize_node(tree.root(), &mut out);
    out
}

fn serialize_node(node: &Node, out: &mut Vec<u8>) {
    match node {
        Node::Leaf(byte) => {
            out.push(LEAF_MARKER);
            out.push(*byte);
        }
        Node::Internal(left, right) => {
            out.push(INTERNAL_MARKER);
            serialize_node(left, out);
            serialize_node(right, out);
        }
    }
}

pub fn write_tree<W: Write>(tree: &HuffmanTree, writer: &mut W) -> Result<()> {
    writer.write_all(&serialize(tree))?;
    Ok(())
}

/// Reads exactly one complete tree from `reader`, leaving anything after it unread.
/// Each symbol may label at most one leaf.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<HuffmanTree> {
    let mut seen = [false; 256];
    read_node(reader, 0, &mut seen).map(HuffmanTree::new)
}

fn read_node<R: Read>(reader: &mut R, depth: usize, seen: &mut [bool; 256]) -> Result<Node> {
    match read_byte(reader, "marker")? {
        LEAF_MARKER => {
            let byte = read_byte(reader, "leaf symbol")?;
            if std::mem::replace(&mut seen[byte as usize], true) {
                return Err(HuffError::MalformedTree(format!(
                    "symbol {byte:#04x} appears on more than one leaf"
                )));
            }
            Ok(Node::Leaf(byte))
        }
        INTERNAL_MARKER => {
            if depth >= MAX_TREE_DEPTH {
                return Err(HuffError::MalformedTree(format!(
                    "nesting exceeds {MAX_TREE_DEPTH} levels"
                )));
            }
            let left = read_node(reader, depth + 1, seen)?;
            let right = read_node(reader, depth + 1, seen)?;
            Ok(Node::internal(left, right))
        }
        other => Err(HuffError::MalformedTree(format!(
            "unknown marker byte {other:#04x}"
        ))),
    }
}

fn read_byte<R: Read>(reader: &mut R, what: &str) -> Result<u8> {
    let mut buf = [0u8; 1];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(buf[0]),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(HuffError::MalformedTree(
            format!("tree data ended while reading {what}"),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Parses a whole tree artifact. Zero bytes is the absent tree of an empty
/// input; bytes left over after a complete tree are rejected.
pub fn deserialize(data: &[u8]) -> Result<Option<HuffmanTree>> {
    if data.is_empty() {
        return Ok(None);
    }
    let mut cursor = Cursor::new(data);
    let tree = read_tree(&mut cursor)?;
    let consumed = cursor.position() as usize;
    if consumed != data.len() {
        return Err(HuffError::MalformedTree(format!(
            "{} trailing bytes after complete tree",
            data.len() - consumed
        )));
    }
    debug!(bytes = data.len(), leaves = tree.leaf_count(), "tree deserialized");
    Ok(Some(tree))
}
