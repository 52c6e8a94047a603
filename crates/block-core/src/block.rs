use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    GENESIS_DIFFICULTY, GENESIS_HASH, GENESIS_LAST_HASH, GENESIS_NONCE, GENESIS_TIMESTAMP,
    SHORT_HASH_LEN,
};
use crate::error::RecordError;
use crate::hash::crypto_hash;

/// The value searched over while mining.
///
/// Mined blocks carry a counter; the genesis block carries a fixed string.
/// Both serialize as bare JSON scalars.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nonce {
    Counter(u64),
    Sentinel(String),
}

impl From<u64> for Nonce {
    fn from(n: u64) -> Self {
        Nonce::Counter(n)
    }
}

impl From<&str> for Nonce {
    fn from(s: &str) -> Self {
        Nonce::Sentinel(s.to_string())
    }
}

impl From<&Nonce> for Value {
    fn from(nonce: &Nonce) -> Self {
        match nonce {
            Nonce::Counter(n) => Value::from(*n),
            Nonce::Sentinel(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nonce::Counter(n) => write!(f, "{n}"),
            Nonce::Sentinel(s) => f.write_str(s),
        }
    }
}

/// A hash-linked, proof-of-work protected record.
///
/// Construction does not check anything; use [`crate::validate_block`] to
/// decide whether a block legitimately extends its predecessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Block {
    /// Creation time in nanoseconds since the Unix epoch.
    pub timestamp: u64,
    pub last_hash: String,
    pub hash: String,
    pub data: Value,
    /// Required number of leading zero bits in `hash`.
    pub difficulty: u32,
    pub nonce: Nonce,
}

impl Block {
    pub fn new(
        timestamp: u64,
        last_hash: impl Into<String>,
        hash: impl Into<String>,
        data: Value,
        difficulty: u32,
        nonce: impl Into<Nonce>,
    ) -> Self {
        Self {
            timestamp,
            last_hash: last_hash.into(),
            hash: hash.into(),
            data,
            difficulty,
            nonce: nonce.into(),
        }
    }

    /// The fixed root block every chain starts from. It is not mined.
    pub fn genesis() -> Self {
        Self::new(
            GENESIS_TIMESTAMP,
            GENESIS_LAST_HASH,
            GENESIS_HASH,
            Value::Array(vec![]),
            GENESIS_DIFFICULTY,
            GENESIS_NONCE,
        )
    }

    pub fn is_genesis(&self) -> bool {
        *self == Self::genesis()
    }

    /// Digest of this block's own fields, in the same order the miner uses.
    pub fn compute_hash(&self) -> String {
        block_hash(
            self.timestamp,
            &self.last_hash,
            &self.data,
            self.difficulty,
            &self.nonce,
        )
    }

    /// First characters of the hash, for display.
    pub fn short_hash(&self) -> String {
        let mut short: String = self.hash.chars().take(SHORT_HASH_LEN).collect();
        short.push_str("...");
        short
    }

    /// Flat mapping of the six block fields, keys in declaration order.
    pub fn to_json(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(6);
        map.insert("timestamp".into(), Value::from(self.timestamp));
        map.insert("last_hash".into(), Value::from(self.last_hash.as_str()));
        map.insert("hash".into(), Value::from(self.hash.as_str()));
        map.insert("data".into(), self.data.clone());
        map.insert("difficulty".into(), Value::from(self.difficulty));
        map.insert("nonce".into(), Value::from(&self.nonce));
        map
    }

    /// Inverse of [`Block::to_json`]. Missing, unknown or mistyped fields are
    /// rejected.
    pub fn from_json(map: Map<String, Value>) -> Result<Self, RecordError> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(timestamp: {}, last_hash: {}, hash: {}, data: {}, difficulty: {}, nonce: {})",
            self.timestamp, self.last_hash, self.hash, self.data, self.difficulty, self.nonce
        )
    }
}

/// Canonical block digest over `(timestamp, last_hash, data, difficulty, nonce)`.
///
/// Mining and validation both go through here so they can never disagree on
/// field order.
pub fn block_hash(
    timestamp: u64,
    last_hash: &str,
    data: &Value,
    difficulty: u32,
    nonce: &Nonce,
) -> String {
    crypto_hash(&[
        Value::from(timestamp),
        Value::from(last_hash),
        data.clone(),
        Value::from(difficulty),
        Value::from(nonce),
    ])
}
