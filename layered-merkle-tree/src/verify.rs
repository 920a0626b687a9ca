//! Proof verification.
//!
//! Pure functions over the proof: no tree required. The root is recomputed
//! from the leaf and the sibling items and compared with the expected root.

use tracing::debug;

use crate::{
    proof::{MerkleProof, Side},
    Digest, MerkleHasher, Result,
};

impl MerkleProof {
    /// Verify that raw leaf `data` is included under `expected_root`.
    ///
    /// Returns `Ok(false)` for a well-formed proof that does not hash up to
    /// the root, and [`MerkleError::Structural`](crate::MerkleError) when the
    /// proof's shape is inconsistent with the tree it claims to come from.
    pub fn verify<H: MerkleHasher>(&self, data: &[u8], expected_root: &Digest) -> Result<bool> {
        self.verify_leaf_hash::<H>(&H::hash(data), expected_root)
    }

    /// Verify that an already hashed leaf is included under `expected_root`.
    pub fn verify_leaf_hash<H: MerkleHasher>(
        &self,
        leaf_hash: &Digest,
        expected_root: &Digest,
    ) -> Result<bool> {
        let computed_root = self.compute_root::<H>(leaf_hash)?;
        Ok(&computed_root == expected_root)
    }

    /// Recompute the root implied by this proof for `leaf_hash`, without
    /// comparing it against anything.
    pub fn compute_root<H: MerkleHasher>(&self, leaf_hash: &Digest) -> Result<Digest> {
        if let Err(e) = self.check_shape() {
            debug!(error = %e, "rejecting malformed proof");
            return Err(e);
        }

        let root = self
            .items
            .iter()
            .fold(*leaf_hash, |current, item| match item.side {
                Side::Left => H::combine(&item.hash, &current),
                Side::Right => H::combine(&current, &item.hash),
            });
        Ok(root)
    }
}
