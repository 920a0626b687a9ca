//! Hash functions used to build and verify the tree.

use sha2::Digest as _;

/// Length in bytes of every digest in the tree.
pub const DIGEST_LEN: usize = 32;

/// Fixed-length output of a [`MerkleHasher`].
pub type Digest = [u8; DIGEST_LEN];

/// Digest primitive for leaves and internal nodes.
///
/// `combine` must hash `left || right` in that order everywhere: the builder,
/// the proof generator and the verifier all go through it.
pub trait MerkleHasher {
    /// Hash raw leaf bytes into a leaf digest.
    fn hash(data: &[u8]) -> Digest;

    /// Combine two child digests into their parent: `H(left || right)`.
    fn combine(left: &Digest, right: &Digest) -> Digest {
        let mut concat = [0u8; DIGEST_LEN * 2];
        concat[..DIGEST_LEN].copy_from_slice(left);
        concat[DIGEST_LEN..].copy_from_slice(right);
        Self::hash(&concat)
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sha256;

impl MerkleHasher for Sha256 {
    fn hash(data: &[u8]) -> Digest {
        sha2::Sha256::digest(data).into()
    }

    fn combine(left: &Digest, right: &Digest) -> Digest {
        let mut hasher = sha2::Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }
}

/// Blake3 with its default 32-byte output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blake3;

impl MerkleHasher for Blake3 {
    fn hash(data: &[u8]) -> Digest {
        *blake3::hash(data).as_bytes()
    }

    fn combine(left: &Digest, right: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left);
        hasher.update(right);
        *hasher.finalize().as_bytes()
    }
}
