//! Binary Merkle tree stored as flat layers.
//!
//! The tree is built once from an ordered, non-empty list of leaves. Each
//! layer holds the digests of one level, leaves first and the single root
//! last. Parent and child are related purely by index: the parent of index
//! `i` is `i / 2` in the next layer.
//!
//! Internal nodes hash `H(left || right)`. For a layer of odd length the
//! tree's [`OddLayerPolicy`] decides what happens to the last node, and the
//! same policy is applied by the builder, the proof generator and the
//! verifier.
//!
//! ```
//! use layered_merkle_tree::{MerkleTree, Sha256};
//!
//! let tree = MerkleTree::<Sha256>::from_data(&["tx1", "tx2", "tx3", "tx4"]).unwrap();
//! let proof = tree.proof(1).unwrap();
//! assert!(proof.verify::<Sha256>(b"tx2", &tree.root()).unwrap());
//! assert!(!proof.verify::<Sha256>(b"tx2-fake", &tree.root()).unwrap());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub(crate) mod hash;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use config::{OddLayerPolicy, TreeOptions};
pub use error::{MerkleError, Result};
pub use hash::{Blake3, Digest, MerkleHasher, Sha256, DIGEST_LEN};
pub use proof::{MerkleProof, ProofItem, Side};
pub use tree::MerkleTree;
