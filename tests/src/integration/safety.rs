//! Accountable safety under honest and Byzantine runs with real latency.

use super::support::{assert_finalized_on_one_chain, small_config};
use ffg_02_network::Network;
use shared_types::SimulationConfig;

fn run_checked(config: SimulationConfig) -> Network {
    let mut network = Network::new(config).unwrap();
    let mut previous: Vec<u64> = network
        .validators()
        .iter()
        .map(|v| v.highest_justified_checkpoint().checkpoint_height)
        .collect();

    for _ in 0..network.config().total_ticks() {
        network.tick();
        for (validator, hjc) in network.validators().iter().zip(previous.iter_mut()) {
            let justified = validator.highest_justified_checkpoint();
            assert!(
                justified.checkpoint_height >= *hjc,
                "{} justified checkpoint regressed",
                validator.id()
            );
            *hjc = justified.checkpoint_height;

            // The head may move to a shorter branch, but never leaves the justified one
            let head_checkpoint = validator.checkpoint_of(&validator.head().id);
            assert!(
                head_checkpoint.is_some_and(|checkpoint| validator.is_ancestor(&justified.id, &checkpoint)),
                "{} head is not under its highest justified checkpoint",
                validator.id()
            );
        }
    }
    network
}

#[test]
fn test_honest_runs_never_finalize_conflicts() {
    for seed in 0..4 {
        let network = run_checked(SimulationConfig {
            seed,
            avg_latency: 15.0,
            ..small_config()
        });
        for validator in network.validators() {
            assert_finalized_on_one_chain(validator);
            assert!(validator.deposit() >= 100, "honest validator lost deposit");
        }
    }
}

#[test]
fn test_byzantine_runs_never_finalize_conflicts() {
    let network = run_checked(SimulationConfig {
        seed: 21,
        avg_latency: 10.0,
        byzantine_fraction: 0.3,
        ..small_config()
    });
    for validator in network.validators() {
        assert_finalized_on_one_chain(validator);
    }
}

#[test]
fn test_finalized_checkpoints_are_justified() {
    let network = run_checked(SimulationConfig {
        seed: 5,
        ..small_config()
    });
    for validator in network.validators() {
        assert!(validator.finalized().is_subset(validator.justified()));
        assert!(validator.is_justified(&validator.highest_justified_checkpoint().id));
    }
}
