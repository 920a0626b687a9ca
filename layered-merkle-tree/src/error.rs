use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleError>`.
pub type Result<T> = core::result::Result<T, MerkleError>;

/// Errors from Merkle tree construction, proof generation and proof
/// verification.
///
/// A proof that is well formed but does not hash up to the expected root is
/// not an error: verification returns `Ok(false)` for it.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MerkleError {
    /// The tree was given zero leaves.
    #[error("cannot build a merkle tree from an empty leaf list")]
    EmptyInput,
    /// No leaf matches the requested digest.
    #[error("leaf not found: {0}")]
    NotFound(String),
    /// Leaf index outside `[0, leaf_count)`.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// The proof shape does not match the tree it claims to come from.
    #[error("malformed proof: {0}")]
    Structural(String),
}
