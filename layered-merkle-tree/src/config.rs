//! Tree construction options.

use bincode::{Decode, Encode};

/// What happens to the last node of a layer with an odd number of nodes.
///
/// Trees built under different policies produce different roots for the same
/// leaves, and a proof from one cannot be verified against the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddLayerPolicy {
    /// Pair the lone node with a copy of itself: `parent = H(x || x)`.
    DuplicateLast,
    /// Carry the lone node unchanged into the next layer.
    #[default]
    PromoteLone,
}

impl OddLayerPolicy {
    /// Whether the node at `index` in a layer of `layer_len` nodes is the
    /// unpaired last node.
    pub(crate) fn is_lone(layer_len: usize, index: usize) -> bool {
        layer_len % 2 == 1 && index == layer_len - 1
    }
}

/// Options for building a [`MerkleTree`](crate::MerkleTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeOptions {
    /// Handling of odd-length layers.
    pub odd_layer_policy: OddLayerPolicy,
}

impl TreeOptions {
    /// Options with the given odd-layer policy.
    pub fn with_policy(odd_layer_policy: OddLayerPolicy) -> Self {
        Self { odd_layer_policy }
    }
}
