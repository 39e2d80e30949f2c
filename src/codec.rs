//! Encode and decode entry points, in memory and on files.

use std::path::Path;

use tracing::{debug, info};

use crate::bitpack;
use crate::codes::CodeTable;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use crate::tree_codec;
use crate::utils;

/// The two artifacts of one encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub payload: Vec<u8>,
    pub tree: Vec<u8>,
}

/// Sizes involved in a file-level operation, for logging and the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub tree_bytes: u64,
}

pub fn encode(data: &[u8]) -> Result<Encoded> {
    let freqs = FrequencyTable::from_bytes(data);
    let Some(tree) = HuffmanTree::build(&freqs) else {
        debug!("empty input, emitting bare padding byte");
        return Ok(Encoded {
            payload: vec![0],
            tree: Vec::new(),
        });
    };

    let table = CodeTable::from_tree(&tree);
    let tree_bytes = tree_codec::serialize(&tree);
    let payload = bitpack::pack(data, &table)?;
    debug!(
        symbols = freqs.distinct(),
        depth = tree.depth(),
        tree_bytes = tree_bytes.len(),
        payload_bytes = payload.len(),
        "encoded"
    );
    Ok(Encoded {
        payload,
        tree: tree_bytes,
    })
}

/// The tree is parsed and validated before any payload bit is read.
pub fn decode(payload: &[u8], tree: &[u8]) -> Result<Vec<u8>> {
    let tree = tree_codec::deserialize(tree)?;
    bitpack::unpack(payload, tree.as_ref())
}

/// Encodes `source` into `dest` plus the tree artifact at `tree_path`.
/// Both artifacts land together or not at all; the source is never touched.
pub fn encode_file(source: &Path, dest: &Path, tree_path: &Path) -> Result<FileReport> {
    let data = utils::read_input(source)?;
    let encoded = encode(&data)?;

    utils::write_all_atomic(&[
        (tree_path, encoded.tree.as_slice()),
        (dest, encoded.payload.as_slice()),
    ])?;

    let report = FileReport {
        input_bytes: data.len() as u64,
        output_bytes: encoded.payload.len() as u64,
        tree_bytes: encoded.tree.len() as u64,
    };
    let written = report.output_bytes + report.tree_bytes;
    info!(
        source = %source.display(),
        dest = %dest.display(),
        tree = %tree_path.display(),
        input = %utils::format_bytes(report.input_bytes),
        output = %utils::format_bytes(written),
        ratio = %format_args!("{:.1}%", utils::compression_ratio(report.input_bytes, written)),
        "compression complete"
    );
    Ok(report)
}

/// Decodes `source` with the tree at `tree_path` into `dest`. On any failure
/// `dest` is left untouched.
pub fn decode_file(source: &Path, tree_path: &Path, dest: &Path) -> Result<FileReport> {
    let tree = utils::read_input(tree_path)?;
    let payload = utils::read_input(source)?;
    let output = decode(&payload, &tree)?;

    utils::write_atomic(dest, &output)?;

    let report = FileReport {
        input_bytes: payload.len() as u64,
        output_bytes: output.len() as u64,
        tree_bytes: tree.len() as u64,
    };
    info!(
        source = %source.display(),
        tree = %tree_path.display(),
        dest = %dest.display(),
        output = %utils::format_bytes(report.output_bytes),
        "decompression complete"
    );
    Ok(report)
}

/// Code table of a stored tree artifact; `None` for the empty-input tree.
pub fn code_table_file(tree_path: &Path) -> Result<Option<CodeTable>> {
    let bytes = utils::read_input(tree_path)?;
    let tree = tree_codec::deserialize(&bytes)?;
    Ok(tree.as_ref().map(CodeTable::from_tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffError;

    #[test]
    fn encodes_aaab() {
        let encoded = encode(b"aaab").unwrap();
        assert_eq!(encoded.payload, vec![4, 0b1110_0000]);
        assert_eq!(encoded.tree, b"01b1a");
        assert_eq!(decode(&encoded.payload, &encoded.tree).unwrap(), b"aaab");
    }

    #[test]
    fn encodes_empty_input() {
        let encoded = encode(&[]).unwrap();
        assert_eq!(encoded.payload, vec![0]);
        assert!(encoded.tree.is_empty());
        assert!(decode(&encoded.payload, &encoded.tree).unwrap().is_empty());
    }

    #[test]
    fn encodes_single_symbol() {
        let encoded = encode(b"zzzz").unwrap();
        assert_eq!(encoded.tree, b"1z");
        assert_eq!(encoded.payload, vec![4, 0]);
        assert_eq!(decode(&encoded.payload, &encoded.tree).unwrap(), b"zzzz");
    }

    #[test]
    fn malformed_tree_stops_decode() {
        let encoded = encode(b"hello").unwrap();
        let mut tree = encoded.tree.clone();
        tree.pop();
        assert!(matches!(
            decode(&encoded.payload, &tree),
            Err(HuffError::MalformedTree(_))
        ));
    }

    #[test]
    fn repeated_encodes_are_identical() {
        let data = b"determinism matters for artifacts on disk";
        assert_eq!(encode(data).unwrap(), encode(data).unwrap());
    }
}
