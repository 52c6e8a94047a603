//! Proof-of-work blocks: mining, difficulty retargeting and validation.
//!
//! A [`Block`] is mined on top of its predecessor with [`Miner::mine`] and
//! later checked against it with [`validate_block`]. Chain storage and
//! networking live outside this crate.

pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod mine;
pub mod pow;
pub mod validate;

pub use block::{block_hash, Block, Nonce};
pub use config::MiningConfig;
pub use error::{Error, RecordError, Result, ValidationError};
pub use hash::{crypto_hash, hex_to_binary};
pub use mine::{Clock, Miner, SystemClock};
pub use pow::{adjust_difficulty, leading_zero_bits, meets_difficulty};
pub use validate::validate_block;
