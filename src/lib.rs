//! # hufpack
//!
//! Byte-oriented Huffman compression producing two artifacts: a bit-packed
//! payload and a separately stored tree.
//!
//! ```
//! let encoded = hufpack::encode(b"aaab")?;
//! assert_eq!(encoded.payload, vec![4, 0b1110_0000]);
//! assert_eq!(encoded.tree, b"01b1a");
//! assert_eq!(hufpack::decode(&encoded.payload, &encoded.tree)?, b"aaab");
//! # Ok::<(), hufpack::HuffError>(())
//! ```

pub mod bitpack;
pub mod codec;
pub mod codes;
pub mod error;
pub mod frequency;
pub mod journal;
pub mod tree;
pub mod tree_codec;
pub mod utils;

pub use codec::{Encoded, FileReport, decode, decode_file, encode, encode_file};
pub use codes::CodeTable;
pub use error::{HuffError, Result};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node};
