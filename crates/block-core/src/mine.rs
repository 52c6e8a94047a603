use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::block::{block_hash, Block, Nonce};
use crate::config::MiningConfig;
use crate::pow::{adjust_difficulty, meets_difficulty};

/// Source of block timestamps, in nanoseconds.
pub trait Clock {
    fn now_nanos(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_nanos(&self) -> u64 {
        (**self).now_nanos()
    }
}

/// Wall clock: nanoseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> u64 {
        nanos_since_epoch(SystemTime::now())
    }
}

/// Nanoseconds from the Unix epoch to `time`; 0 for times before the epoch.
fn nanos_since_epoch(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => u64::try_from(d.as_nanos()).unwrap_or(u64::MAX),
        Err(e) => {
            warn!(
                "System clock is {:?} before the Unix epoch, using timestamp 0",
                e.duration()
            );
            0
        }
    }
}

/// Brute-force block producer.
///
/// Every attempt bumps the nonce, takes a fresh timestamp and re-derives the
/// difficulty from it, so the difficulty stored in the mined block always
/// matches its own timestamp.
#[derive(Clone, Debug)]
pub struct Miner<C = SystemClock> {
    config: MiningConfig,
    clock: C,
}

impl Miner<SystemClock> {
    pub fn with_config(config: MiningConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl Default for Miner<SystemClock> {
    fn default() -> Self {
        Self::with_config(MiningConfig::default())
    }
}

impl<C: Clock> Miner<C> {
    pub fn new(config: MiningConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mine a block carrying `data` on top of `last_block`.
    ///
    /// Loops until the proof-of-work holds; there is no attempt limit.
    pub fn mine(&self, last_block: &Block, data: impl Into<Value>) -> Block {
        let data = data.into();
        let last_hash = last_block.hash.as_str();

        let mut nonce = 0u64;
        let mut timestamp = self.clock.now_nanos();
        let mut difficulty = adjust_difficulty(last_block, timestamp, &self.config);
        let mut hash = block_hash(
            timestamp,
            last_hash,
            &data,
            difficulty,
            &Nonce::Counter(nonce),
        );

        while !meets_difficulty(&hash, difficulty) {
            nonce = nonce.wrapping_add(1);
            timestamp = self.clock.now_nanos();
            difficulty = adjust_difficulty(last_block, timestamp, &self.config);
            hash = block_hash(
                timestamp,
                last_hash,
                &data,
                difficulty,
                &Nonce::Counter(nonce),
            );
        }

        debug!(
            "Search on top of {} took {} attempts",
            last_block.short_hash(),
            u128::from(nonce) + 1
        );
        let block = Block::new(timestamp, last_hash, hash, data, difficulty, nonce);
        info!(
            "Mined block {} with nonce {} at difficulty {}",
            block.short_hash(),
            nonce,
            difficulty
        );
        block
    }
}

impl Block {
    /// Mine a block on top of `last_block` using the system clock.
    pub fn mine_block(last_block: &Block, data: impl Into<Value>, config: &MiningConfig) -> Block {
        Miner::with_config(*config).mine(last_block, data)
    }
}
