//! Offline validators keep their stake, so losing more than a third of it
//! halts justification while everything up to a third is tolerated.

use super::support::{fast_network, small_config, EPOCH};
use shared_types::{SimulationConfig, ValidatorId};

fn run_partitioned(fraction: f64) -> ffg_02_network::Network {
    let mut network = fast_network(SimulationConfig {
        disconnected_fraction: fraction,
        reward_bps: 0,
        ..small_config()
    });
    network.run();
    network
}

#[test]
fn test_partition_below_a_third_still_justifies() {
    let network = run_partitioned(0.3);

    assert_eq!(network.online_validators().count(), 7);
    for v in network.online_validators() {
        // Offline proposers leave gaps, so the chain is shorter than a full run
        let last_checkpoint = v.head().height / EPOCH;
        assert!(last_checkpoint > 0);
        assert_eq!(v.highest_justified_checkpoint().checkpoint_height, last_checkpoint);
    }
}

#[test]
fn test_partition_above_a_third_stalls() {
    let network = run_partitioned(0.4);

    assert_eq!(network.online_validators().count(), 6);
    for v in network.online_validators() {
        assert_eq!(v.highest_justified_checkpoint().id, network.genesis().id);
        assert_eq!(v.finalized().len(), 1);
        // Blocks are still produced, only finality stops
        assert!(v.head().height > 0);
    }
}

#[test]
fn test_offline_validators_stay_at_genesis() {
    let network = run_partitioned(0.4);

    for id in 6..10u32 {
        let v = network.validator(ValidatorId(id)).unwrap();
        assert!(!network.is_online(v.id()));
        assert_eq!(v.head().id, network.genesis().id);
        assert_eq!(v.proposed_blocks(), 0);
        assert!(v.cast_votes().is_empty());
    }
}
