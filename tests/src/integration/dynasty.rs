//! Validator-set rotation at finalized checkpoints.

use super::support::{fast_network, small_config, EPOCH};
use shared_types::{SimulationConfig, ValidatorSet};
use std::collections::HashSet;

fn dynasty_config() -> SimulationConfig {
    SimulationConfig {
        dynasty_size: Some(7),
        reward_bps: 0,
        ..small_config()
    }
}

#[test]
fn test_sets_rotate_and_finality_continues() {
    let mut network = fast_network(dynasty_config());
    network.run();

    let genesis = network.genesis();
    assert_eq!(genesis.validators, ValidatorSet::range(10));
    assert_eq!(genesis.next_validators.len(), 7);

    let observer = &network.validators()[0];
    let mut sets = HashSet::new();
    for (_, block) in observer.received_blocks() {
        if block.height < EPOCH {
            assert_eq!(block.validators, genesis.validators);
        } else {
            assert_eq!(block.validators.len(), 7);
        }
        if block.is_checkpoint {
            sets.insert(block.validators.clone());
        }
    }
    // Full set, the first rotation, and at least one later one
    assert!(sets.len() >= 3, "only {} distinct sets", sets.len());

    let epochs = network.config().epochs;
    assert_eq!(observer.highest_justified_checkpoint().checkpoint_height, epochs);
}

#[test]
fn test_only_members_vote_for_a_checkpoint() {
    let mut network = fast_network(dynasty_config());
    network.run();

    for v in network.validators() {
        for vote in v.cast_votes() {
            let Some((_, target)) = v.received_blocks().find(|(id, _)| **id == vote.target_id) else {
                panic!("vote for unknown target {}", vote.target_id);
            };
            assert!(target.validators.contains(&v.id()));
        }
    }
}
