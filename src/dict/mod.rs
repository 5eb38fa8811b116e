//! Pre-digested dictionaries and the one-shot dictionary entry points.
//!
//! A dictionary is digested once ([`CompressionDictionary::new`],
//! [`DecompressionDictionary::new`]) and then shared read-only through an
//! `Arc` by any number of contexts and streams.  Both types are
//! `Send + Sync`.

pub mod cdict;
pub mod ddict;
pub mod oneshot;

pub use cdict::CompressionDictionary;
pub use ddict::DecompressionDictionary;
pub use oneshot::{
    compress_using_cdict, compress_with_dictionary, compress_with_dictionary_policy,
    decompress_using_ddict, decompress_with_dictionary,
};

use crate::frame::header::read_le32;

/// Magic number opening a structured ("full") zstd dictionary.
pub const ZSTD_MAGIC_DICTIONARY: u32 = 0xEC30_A437;

/// Dictionary ID stored in `dict`, or `0` for raw-content dictionaries
/// (`ZSTD_getDictID_fromDict`).
pub fn dictionary_id(dict: &[u8]) -> u32 {
    if dict.len() < 8 || read_le32(dict, 0) != ZSTD_MAGIC_DICTIONARY {
        return 0;
    }
    read_le32(dict, 4)
}
