//! Error types for block records and block validation.

use thiserror::Error;

/// A candidate block failed to extend its predecessor.
///
/// Validation stops at the first rule that fails, so only one variant is
/// ever reported for a given pair of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `last_hash` does not point at the predecessor.
    #[error("broken linkage: block last_hash {found} does not match predecessor hash {expected}")]
    BrokenLinkage { expected: String, found: String },

    /// The hash does not carry `difficulty` leading zero bits.
    #[error("proof of work not met: hash {hash} does not have {difficulty} leading zero bits")]
    ProofOfWorkNotMet { hash: String, difficulty: u32 },

    /// Difficulty moved more than one step away from the predecessor's.
    #[error("illegal difficulty jump from {previous} to {current}")]
    IllegalDifficultyJump { previous: u32, current: u32 },

    /// The stored hash is not the digest of the block's own fields.
    #[error("hash mismatch: block hash {found} but fields digest to {expected}")]
    HashMismatch { expected: String, found: String },
}

/// A serialized block mapping could not be turned back into a block.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed block record: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("invalid configuration: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
