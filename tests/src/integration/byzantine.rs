//! Replay attackers against an honest majority.

use super::support::{fast_network, small_config, DEPOSIT};
use ffg_01_finality::Validator;
use shared_types::{Deposit, SimulationConfig};

fn byzantine_config() -> SimulationConfig {
    SimulationConfig {
        byzantine_fraction: 0.3,
        replay_probability: 1.0,
        ..small_config()
    }
}

#[test]
fn test_replayers_are_slashed_and_honest_are_not() {
    let mut network = fast_network(byzantine_config());
    network.run();

    let (byzantine, honest): (Vec<&Validator>, Vec<&Validator>) =
        network.validators().iter().partition(|v| v.is_byzantine());
    assert_eq!(byzantine.len(), 3);

    for v in &byzantine {
        assert!(v.deposit() < DEPOSIT, "{} kept its deposit", v.id());
    }
    for v in &honest {
        assert!(v.deposit() >= DEPOSIT, "{} was penalised", v.id());
    }
}

#[test]
fn test_honest_majority_keeps_justifying() {
    let mut network = fast_network(byzantine_config());
    network.run();

    let epochs = network.config().epochs;
    for v in network.validators().iter().filter(|v| !v.is_byzantine()) {
        assert_eq!(v.highest_justified_checkpoint().checkpoint_height, epochs);
        assert!(v.finalized().len() as u64 >= epochs);
    }
}

#[test]
fn test_total_deposit_tracks_every_adjustment() {
    let mut network = fast_network(SimulationConfig {
        avg_latency: 8.0,
        ..byzantine_config()
    });

    let mut slashed = 0;
    for _ in 0..network.config().total_ticks() {
        let report = network.tick();
        slashed += report.settlement.slashed.len();
        let sum: Deposit = network.validators().iter().map(Validator::deposit).sum();
        assert_eq!(network.total_deposit(), sum);
    }
    assert!(slashed > 0);
}

#[test]
fn test_zero_replay_probability_is_harmless() {
    let mut network = fast_network(SimulationConfig {
        replay_probability: 0.0,
        reward_bps: 0,
        ..byzantine_config()
    });
    network.run();

    assert_eq!(network.total_deposit(), 1_000);
    assert!(network.validators().iter().all(|v| v.deposit() == DEPOSIT));
}
