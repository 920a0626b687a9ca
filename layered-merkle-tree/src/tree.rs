use std::{fmt, marker::PhantomData};

use tracing::debug;

use crate::{
    Digest, MerkleError, MerkleHasher, MerkleProof, OddLayerPolicy, Result, Sha256, TreeOptions,
};

/// A binary Merkle tree holding every layer from the leaves to the root.
///
/// `layers[0]` holds the leaf digests and the last layer holds only the
/// root. Each layer has `ceil(previous / 2)` digests. The tree is immutable
/// once built; any change to the leaf set needs a new tree.
pub struct MerkleTree<H: MerkleHasher = Sha256> {
    layers: Vec<Vec<Digest>>,
    policy: OddLayerPolicy,
    _hasher: PhantomData<fn() -> H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Hash each data block into a leaf and build the tree with default
    /// options.
    pub fn from_data<T: AsRef<[u8]>>(data: &[T]) -> Result<Self> {
        Self::from_data_with_options(data, TreeOptions::default())
    }

    /// Hash each data block into a leaf and build the tree.
    pub fn from_data_with_options<T: AsRef<[u8]>>(
        data: &[T],
        options: TreeOptions,
    ) -> Result<Self> {
        let leaves = data.iter().map(|d| H::hash(d.as_ref())).collect();
        Self::from_leaf_hashes_with_options(leaves, options)
    }

    /// Build the tree from already hashed leaves with default options.
    pub fn from_leaf_hashes(leaves: Vec<Digest>) -> Result<Self> {
        Self::from_leaf_hashes_with_options(leaves, TreeOptions::default())
    }

    /// Build the tree from already hashed leaves.
    ///
    /// Fails with [`MerkleError::EmptyInput`] when `leaves` is empty.
    pub fn from_leaf_hashes_with_options(
        leaves: Vec<Digest>,
        options: TreeOptions,
    ) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let policy = options.odd_layer_policy;
        let leaf_count = leaves.len();

        let mut layers = vec![leaves];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = next_layer::<H>(current, policy);
            layers.push(next);
        }

        debug!(
            leaf_count,
            height = layers.len(),
            ?policy,
            "built merkle tree"
        );

        Ok(Self {
            layers,
            policy,
            _hasher: PhantomData,
        })
    }

    /// The root digest.
    pub fn root(&self) -> Digest {
        // Construction guarantees at least one layer ending in one digest.
        self.layers[self.layers.len() - 1][0]
    }

    /// The root digest as lowercase hex.
    pub fn root_hex(&self) -> String {
        hex::encode(self.root())
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers, leaves and root included. A single-leaf tree has
    /// height 1.
    pub fn height(&self) -> usize {
        self.layers.len()
    }

    /// The leaf digests in insertion order.
    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }

    /// All layers, leaves first.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// The layer at `level` (0 = leaves), if the tree is that tall.
    pub fn layer(&self, level: usize) -> Option<&[Digest]> {
        self.layers.get(level).map(Vec::as_slice)
    }

    /// The odd-layer policy this tree was built with.
    pub fn policy(&self) -> OddLayerPolicy {
        self.policy
    }

    /// Index of the first leaf equal to `leaf_hash`.
    ///
    /// Leaves may repeat; index-based access is the unambiguous way to address
    /// them.
    pub fn leaf_index(&self, leaf_hash: &Digest) -> Option<usize> {
        self.leaves().iter().position(|leaf| leaf == leaf_hash)
    }

    /// Verify `proof` for raw leaf `data` against this tree's own root.
    pub fn verify(&self, proof: &MerkleProof, data: &[u8]) -> Result<bool> {
        proof.verify::<H>(data, &self.root())
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        level: usize,
        index: usize,
        prefix: &str,
        last: bool,
    ) -> fmt::Result {
        let branch = if last { "└─ " } else { "├─ " };
        writeln!(
            f,
            "{}{}{}",
            prefix,
            branch,
            hex::encode(self.layers[level][index])
        )?;
        if level == 0 {
            return Ok(());
        }
        let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
        let below = &self.layers[level - 1];
        let left = 2 * index;
        let has_right = left + 1 < below.len();
        self.fmt_node(f, level - 1, left, &child_prefix, !has_right)?;
        if has_right {
            self.fmt_node(f, level - 1, left + 1, &child_prefix, true)?;
        }
        Ok(())
    }
}

/// Pair adjacent digests left to right and hash each pair into its parent.
fn next_layer<H: MerkleHasher>(layer: &[Digest], policy: OddLayerPolicy) -> Vec<Digest> {
    layer
        .chunks(2)
        .map(|pair| match (pair, policy) {
            ([left, right], _) => H::combine(left, right),
            ([lone], OddLayerPolicy::DuplicateLast) => H::combine(lone, lone),
            ([lone], OddLayerPolicy::PromoteLone) => *lone,
            _ => unreachable!("chunks(2) yields one or two digests"),
        })
        .collect()
}

impl<H: MerkleHasher> Clone for MerkleTree<H> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            policy: self.policy,
            _hasher: PhantomData,
        }
    }
}

impl<H: MerkleHasher> fmt::Debug for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root", &self.root_hex())
            .field("leaf_count", &self.leaf_count())
            .field("height", &self.height())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Renders the tree root first, one hex digest per line, children indented
/// under their parent.
impl<H: MerkleHasher> fmt::Display for MerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.layers.len() - 1, 0, "", true)
    }
}
