use tracing::debug;

use crate::block::Block;
use crate::error::ValidationError;
use crate::pow::meets_difficulty;

/// Check that `block` legitimately extends `last_block`.
///
/// Rules are checked in a fixed order and the first failure is returned:
/// linkage, proof-of-work, difficulty step, then the recomputed hash.
pub fn validate_block(last_block: &Block, block: &Block) -> Result<(), ValidationError> {
    check(last_block, block).inspect_err(|err| {
        debug!("Rejected block {}: {}", block.short_hash(), err);
    })
}

fn check(last_block: &Block, block: &Block) -> Result<(), ValidationError> {
    if block.last_hash != last_block.hash {
        return Err(ValidationError::BrokenLinkage {
            expected: last_block.hash.clone(),
            found: block.last_hash.clone(),
        });
    }

    if !meets_difficulty(&block.hash, block.difficulty) {
        return Err(ValidationError::ProofOfWorkNotMet {
            hash: block.hash.clone(),
            difficulty: block.difficulty,
        });
    }

    if last_block.difficulty.abs_diff(block.difficulty) > 1 {
        return Err(ValidationError::IllegalDifficultyJump {
            previous: last_block.difficulty,
            current: block.difficulty,
        });
    }

    let expected = block.compute_hash();
    if block.hash != expected {
        return Err(ValidationError::HashMismatch {
            expected,
            found: block.hash.clone(),
        });
    }

    Ok(())
}

impl Block {
    pub fn is_valid_block(last_block: &Block, block: &Block) -> Result<(), ValidationError> {
        validate_block(last_block, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{block_hash, Nonce};
    use crate::config::MiningConfig;
    use crate::mine::{Clock, Miner};
    use serde_json::json;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_nanos(&self) -> u64 {
            self.0
        }
    }

    fn mined_on_genesis() -> (Block, Block) {
        let genesis = Block::genesis();
        let block = Block::mine_block(&genesis, "foo", &MiningConfig::default());
        (genesis, block)
    }

    #[test]
    fn accepts_mined_block() {
        let (genesis, block) = mined_on_genesis();
        assert_eq!(validate_block(&genesis, &block), Ok(()));
        assert_eq!(Block::is_valid_block(&genesis, &block), Ok(()));
    }

    #[test]
    fn accepts_block_mined_with_raised_difficulty() {
        let last = Block::new(50, "x", "parent-hash", json!([]), 2, 0u64);
        let block = Miner::new(MiningConfig::default(), FixedClock(51)).mine(&last, "foo");
        assert_eq!(block.difficulty, 3);
        assert_eq!(validate_block(&last, &block), Ok(()));
    }

    #[test]
    fn accepts_mined_block_after_data_keys_are_reordered() {
        let genesis = Block::genesis();
        let mut data = serde_json::Map::new();
        data.insert("to".into(), json!("bob"));
        data.insert("from".into(), json!("alice"));
        let mut block = Block::mine_block(
            &genesis,
            serde_json::Value::Object(data),
            &MiningConfig::default(),
        );

        // As if a storage layer handed the payload back with sorted keys.
        block.data = json!({"from": "alice", "to": "bob"});
        assert_eq!(validate_block(&genesis, &block), Ok(()));
    }

    #[test]
    fn rejects_bad_last_hash() {
        let (genesis, mut block) = mined_on_genesis();
        block.last_hash = "evil_last_hash".into();
        assert_eq!(
            validate_block(&genesis, &block),
            Err(ValidationError::BrokenLinkage {
                expected: genesis.hash.clone(),
                found: "evil_last_hash".into(),
            })
        );
    }

    #[test]
    fn rejects_bad_proof_of_work() {
        let (genesis, mut block) = mined_on_genesis();
        block.hash = "fff".into();
        assert!(matches!(
            validate_block(&genesis, &block),
            Err(ValidationError::ProofOfWorkNotMet { .. })
        ));
    }

    #[test]
    fn rejects_non_hex_hash_as_proof_of_work_failure() {
        let (genesis, mut block) = mined_on_genesis();
        block.hash = "not-a-hash".into();
        assert!(matches!(
            validate_block(&genesis, &block),
            Err(ValidationError::ProofOfWorkNotMet { .. })
        ));
    }

    #[test]
    fn rejects_jumped_difficulty() {
        let genesis = Block::genesis();
        let jumped = 10;
        // A hash with plenty of leading zeros so only the jump can fail.
        let block = Block::new(
            2,
            genesis.hash.as_str(),
            format!("{}{}", "0".repeat(8), "f".repeat(56)),
            json!("foo"),
            jumped,
            0u64,
        );
        assert_eq!(
            validate_block(&genesis, &block),
            Err(ValidationError::IllegalDifficultyJump {
                previous: 3,
                current: jumped,
            })
        );
    }

    #[test]
    fn rejects_jump_downwards() {
        let last = Block::new(1, "x", "parent-hash", json!([]), 5, 0u64);
        let block = Block::new(2, "parent-hash", "0".repeat(64), json!([]), 3, 0u64);
        assert!(matches!(
            validate_block(&last, &block),
            Err(ValidationError::IllegalDifficultyJump {
                previous: 5,
                current: 3
            })
        ));
    }

    #[test]
    fn rejects_tampered_data() {
        let (genesis, mut block) = mined_on_genesis();
        block.data = json!("tampered");
        let expected = block.compute_hash();
        assert_eq!(
            validate_block(&genesis, &block),
            Err(ValidationError::HashMismatch {
                expected,
                found: block.hash.clone(),
            })
        );
    }

    #[test]
    fn rejects_proof_of_work_for_different_data() {
        // Find a hash that satisfies difficulty 3 for "bar", then claim it is "foo".
        let genesis = Block::genesis();
        let timestamp = 1_000;
        let difficulty = 3;
        let (nonce, hash) = (0u64..)
            .map(|n| {
                let nonce = Nonce::Counter(n);
                let hash =
                    block_hash(timestamp, &genesis.hash, &json!("bar"), difficulty, &nonce);
                (n, hash)
            })
            .find(|(_, hash)| meets_difficulty(hash, difficulty))
            .unwrap();
        let block = Block::new(
            timestamp,
            genesis.hash.as_str(),
            hash,
            json!("foo"),
            difficulty,
            nonce,
        );
        assert!(matches!(
            validate_block(&genesis, &block),
            Err(ValidationError::HashMismatch { .. })
        ));
    }

    #[test]
    fn linkage_is_checked_before_proof_of_work() {
        let (genesis, mut block) = mined_on_genesis();
        block.last_hash = "other".into();
        block.hash = "ffff".into();
        block.difficulty = 40;
        assert!(matches!(
            validate_block(&genesis, &block),
            Err(ValidationError::BrokenLinkage { .. })
        ));
    }
}
