use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::MINE_RATE;
use crate::error::{Error, Result};

/// Parameters handed to the miner and to difficulty adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Target interval between blocks, in nanoseconds.
    pub mine_rate: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            mine_rate: MINE_RATE,
        }
    }
}

impl MiningConfig {
    pub fn new(mine_rate: Duration) -> Self {
        Self {
            mine_rate: u64::try_from(mine_rate.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Parse a config from JSON, e.g. `{"mine_rate": 4000000000}`.
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(Error::ConfigParse)?;
        if config.mine_rate == 0 {
            return Err(Error::InvalidConfig("mine_rate must be greater than zero"));
        }
        Ok(config)
    }

    pub fn mine_rate(&self) -> Duration {
        Duration::from_nanos(self.mine_rate)
    }
}
