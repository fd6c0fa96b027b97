//! blake2b digests used by the ledger: 32-byte block hashes, 5-byte address
//! checksums and 8-byte work values

use blake2::digest::consts::{U32, U5, U8};
use blake2::{Blake2b, Digest};

fn digest_parts<D: Digest, const N: usize>(parts: &[&[u8]]) -> [u8; N] {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut out = [0u8; N];
    out.copy_from_slice(result.as_slice());
    out
}

/// 256-bit digest over the concatenation of `parts`
pub fn blake2b_256(parts: &[&[u8]]) -> [u8; 32] {
    digest_parts::<Blake2b<U32>, 32>(parts)
}

/// 40-bit digest, as used for account checksums
pub fn blake2b_40(parts: &[&[u8]]) -> [u8; 5] {
    digest_parts::<Blake2b<U5>, 5>(parts)
}

/// 64-bit digest, as used for work values
pub fn blake2b_64(parts: &[&[u8]]) -> [u8; 8] {
    digest_parts::<Blake2b<U8>, 8>(parts)
}
