//! Inclusion proof generation.
//!
//! A `MerkleProof` carries the sibling digests on the path from one leaf to
//! the root, leaf end first, each tagged with the side the sibling sits on.
//! It also records the leaf index, the leaf count and the odd-layer policy of
//! the tree it came from, which fixes how many items a well-formed proof has.

use bincode::{Decode, Encode};

use crate::{Digest, MerkleError, MerkleHasher, MerkleTree, OddLayerPolicy, Result};


/// Which side of the path node its sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Sibling is the left child: `parent = H(sibling || current)`.
    Left,
    /// Sibling is the right child: `parent = H(current || sibling)`.
    Right,
}

/// One step of a proof: a sibling digest and its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProofItem {
    /// Digest of the sibling node.
    pub hash: Digest,
    /// Side of the sibling relative to the path node.
    pub side: Side,
}

/// An inclusion proof for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleProof {
    pub(crate) leaf_index: usize,
    pub(crate) leaf_count: usize,
    pub(crate) policy: OddLayerPolicy,
    pub(crate) items: Vec<ProofItem>,
}

impl MerkleProof {
    /// Assemble a proof from its parts, e.g. after receiving them from
    /// elsewhere. The shape is checked when the proof is verified.
    pub fn new(
        leaf_index: usize,
        leaf_count: usize,
        policy: OddLayerPolicy,
        items: Vec<ProofItem>,
    ) -> Self {
        Self {
            leaf_index,
            leaf_count,
            policy,
            items,
        }
    }

    /// Index of the proved leaf.
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// Number of leaves in the tree the proof was generated from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Odd-layer policy of the tree the proof was generated from.
    pub fn policy(&self) -> OddLayerPolicy {
        self.policy
    }

    /// Sibling items, leaf end first.
    pub fn items(&self) -> &[ProofItem] {
        &self.items
    }

    /// Number of sibling items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for a proof with no items (single-leaf tree).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sibling digests as lowercase hex, leaf end first.
    pub fn hex_items(&self) -> Vec<String> {
        self.items.iter().map(|item| hex::encode(item.hash)).collect()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::Structural(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects proofs whose item count does not match their leaf index, leaf
    /// count and policy.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 1024 * 1024 }>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::Structural(format!("decode error: {}", e)))?;
        proof.check_shape()?;
        Ok(proof)
    }

    /// Validate that the proof has the shape implied by its leaf index, leaf
    /// count and policy.
    pub(crate) fn check_shape(&self) -> Result<()> {
        if self.leaf_count == 0 {
            return Err(MerkleError::Structural(
                "proof claims a tree with zero leaves".into(),
            ));
        }
        if self.leaf_index >= self.leaf_count {
            return Err(MerkleError::Structural(format!(
                "leaf index {} is not below leaf count {}",
                self.leaf_index, self.leaf_count
            )));
        }
        let expected = expected_len(self.leaf_index, self.leaf_count, self.policy);
        if self.items.len() != expected {
            return Err(MerkleError::Structural(format!(
                "expected {} proof items for leaf {} of {} ({:?}), got {}",
                expected,
                self.leaf_index,
                self.leaf_count,
                self.policy,
                self.items.len()
            )));
        }
        Ok(())
    }
}

/// Number of items in the proof of leaf `leaf_index` in a tree of
/// `leaf_count` leaves.
///
/// Under `DuplicateLast` this is always `height - 1`. Under `PromoteLone`
/// every layer where the path node is the unpaired last node is skipped.
pub(crate) fn expected_len(
    leaf_index: usize,
    leaf_count: usize,
    policy: OddLayerPolicy,
) -> usize {
    let mut index = leaf_index;
    let mut layer_len = leaf_count;
    let mut items = 0;
    while layer_len > 1 {
        let promoted = policy == OddLayerPolicy::PromoteLone
            && OddLayerPolicy::is_lone(layer_len, index);
        if !promoted {
            items += 1;
        }
        index /= 2;
        layer_len = layer_len.div_ceil(2);
    }
    items
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Proof for the leaf at `index`.
    ///
    /// Fails with [`MerkleError::IndexOutOfRange`] when `index` is not below
    /// the leaf count.
    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }

        let policy = self.policy();
        let layers = self.layers();
        let mut items = Vec::with_capacity(layers.len() - 1);
        let mut position = index;

        // The root layer has no sibling.
        for layer in &layers[..layers.len() - 1] {
            if OddLayerPolicy::is_lone(layer.len(), position) {
                if policy == OddLayerPolicy::DuplicateLast {
                    items.push(ProofItem {
                        hash: layer[position],
                        side: Side::Right,
                    });
                }
            } else {
                let side = if position % 2 == 0 {
                    Side::Right
                } else {
                    Side::Left
                };
                items.push(ProofItem {
                    hash: layer[position ^ 1],
                    side,
                });
            }
            position /= 2;
        }

        Ok(MerkleProof {
            leaf_index: index,
            leaf_count,
            policy,
            items,
        })
    }

    /// Proof for the first leaf whose digest equals `leaf_hash`.
    ///
    /// Fails with [`MerkleError::NotFound`] when no leaf matches.
    pub fn proof_for_leaf_hash(&self, leaf_hash: &Digest) -> Result<MerkleProof> {
        let index = self
            .leaf_index(leaf_hash)
            .ok_or_else(|| MerkleError::NotFound(hex::encode(leaf_hash)))?;
        self.proof(index)
    }

    /// Proof for the first leaf whose data hashes to the same digest as
    /// `data`.
    pub fn proof_for_data(&self, data: &[u8]) -> Result<MerkleProof> {
        self.proof_for_leaf_hash(&H::hash(data))
    }
}
