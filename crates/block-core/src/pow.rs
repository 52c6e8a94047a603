//! Proof-of-work predicate and difficulty retargeting.

use crate::block::Block;
use crate::config::MiningConfig;
use crate::constants::{BITS_PER_HEX_DIGIT, MIN_DIFFICULTY};

/// Count the leading zero bits of a hex-encoded hash.
///
/// Equivalent to counting leading `'0'`s of `hex_to_binary(hash)`, without
/// building the binary string. Returns `None` on a non-hex character.
pub fn leading_zero_bits(hash: &str) -> Option<u32> {
    let mut total = 0u32;
    for c in hash.chars() {
        let nibble = c.to_digit(16)?;
        if nibble == 0 {
            total += BITS_PER_HEX_DIGIT as u32;
        } else {
            // `nibble` fits in the low 4 bits of a u32.
            total += nibble.leading_zeros() - (u32::BITS - BITS_PER_HEX_DIGIT as u32);
            return Some(total);
        }
    }
    Some(total)
}

/// True if the binary form of `hash` starts with `difficulty` zeros.
///
/// A hash that is not valid hex, or is too short to hold `difficulty` bits,
/// never meets the requirement.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    if (hash.len() as u64) * (BITS_PER_HEX_DIGIT as u64) < difficulty as u64 {
        return false;
    }
    leading_zero_bits(hash).is_some_and(|zeros| zeros >= difficulty)
}

/// Difficulty for a block mined at `new_timestamp` on top of `last_block`.
///
/// Raise by one if the block came sooner than the configured mine rate,
/// otherwise lower by one, never going under [`MIN_DIFFICULTY`]. A timestamp
/// earlier than the predecessor's counts as "too fast".
pub fn adjust_difficulty(last_block: &Block, new_timestamp: u64, config: &MiningConfig) -> u32 {
    let elapsed = new_timestamp.saturating_sub(last_block.timestamp);
    if elapsed < config.mine_rate {
        return last_block.difficulty.saturating_add(1);
    }
    if last_block.difficulty > MIN_DIFFICULTY {
        return last_block.difficulty - 1;
    }
    MIN_DIFFICULTY
}
