//! Bit packing of encoded symbols and the reverse tree walk.
//!
//! Payload layout:
//!   Byte 0:      padding count (0..=7)
//!   Bytes 1..N:  code bits, MSB first, last `padding` bits are zero filler
//!
//! A symbol whose code is empty (the lone leaf of a single-symbol tree) is
//! written as one `0` bit per occurrence, so the payload still carries the
//! repetition count.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use tracing::{debug, trace};

use crate::codes::CodeTable;
use crate::error::{HuffError, Result};
use crate::tree::{HuffmanTree, Node};

/// Number of zero bits needed to round `bit_len` up to a whole byte.
pub fn padding_for(bit_len: u64) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

pub fn pack(data: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let mut lookup: [Option<&[bool]>; 256] = [None; 256];
    for (byte, code) in table.iter() {
        lookup[byte as usize] = Some(code);
    }

    let mut bit_len: u64 = 0;
    for &byte in data {
        let code = lookup[byte as usize].ok_or(HuffError::UnknownSymbol(byte))?;
        bit_len += code.len().max(1) as u64;
    }
    let padding = padding_for(bit_len);

    let mut output = Vec::with_capacity(1 + (bit_len as usize).div_ceil(8));
    output.push(padding);
    {
        let mut writer = BitWriter::endian(&mut output, BigEndian);
        for &byte in data {
            let code = lookup[byte as usize].unwrap_or_default();
            if code.is_empty() {
                writer.write_bit(false)?;
            } else {
                for &bit in code {
                    writer.write_bit(bit)?;
                }
            }
        }
        writer.byte_align()?;
    }

    debug!(symbols = data.len(), bits = bit_len, padding, "payload packed");
    Ok(output)
}

/// Decodes a payload with the tree it was packed against.
///
/// An absent tree (empty original input) yields no output as long as the
/// padding byte is present and valid.
pub fn unpack(payload: &[u8], tree: Option<&HuffmanTree>) -> Result<Vec<u8>> {
    let (&padding, packed) = payload
        .split_first()
        .ok_or_else(|| HuffError::MalformedPayload("missing padding byte".into()))?;
    if padding > 7 {
        return Err(HuffError::MalformedPayload(format!(
            "padding count {padding} is larger than 7"
        )));
    }

    let Some(tree) = tree else {
        trace!("no tree, payload decodes to nothing");
        return Ok(Vec::new());
    };

    let available = packed.len() as u64 * 8;
    if u64::from(padding) > available {
        return Err(HuffError::MalformedPayload(format!(
            "padding count {padding} exceeds {available} payload bits"
        )));
    }
    let bit_len = available - u64::from(padding);

    let mut reader = BitReader::endian(packed, BigEndian);
    let mut output = Vec::new();
    let root = tree.root();

    if let Node::Leaf(byte) = root {
        for _ in 0..bit_len {
            if reader.read_bit()? {
                return Err(HuffError::MalformedPayload(
                    "set bit in a single-symbol payload".into(),
                ));
            }
            output.push(*byte);
        }
        return Ok(output);
    }

    let mut node = root;
    for _ in 0..bit_len {
        let bit = reader.read_bit()?;
        if let Node::Internal(left, right) = node {
            node = if bit { right } else { left };
        }
        if let Node::Leaf(byte) = node {
            output.push(*byte);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(HuffError::TruncatedPayload {
            decoded: output.len(),
        });
    }

    debug!(bits = bit_len, symbols = output.len(), "payload unpacked");
    Ok(output)
}
