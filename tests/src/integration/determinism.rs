//! Same seed, same run; parallel delivery changes nothing.

use super::support::small_config;
use ffg_02_network::Network;
use shared_types::SimulationConfig;
use sim_runtime::run_simulation;

fn fingerprint(network: &Network) -> Vec<(String, usize, usize, u64)> {
    network
        .validators()
        .iter()
        .map(|v| {
            (
                v.head().id.to_string(),
                v.justified().len(),
                v.finalized().len(),
                v.deposit(),
            )
        })
        .collect()
}

fn config() -> SimulationConfig {
    SimulationConfig {
        avg_latency: 12.0,
        byzantine_fraction: 0.2,
        ..small_config()
    }
}

#[test]
fn test_same_seed_same_outcome() {
    let mut a = Network::new(config()).unwrap();
    let mut b = Network::new(config()).unwrap();
    a.run();
    b.run();

    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_eq!(a.total_deposit(), b.total_deposit());
}

#[test]
fn test_different_seed_different_genesis() {
    let a = Network::new(config()).unwrap();
    let b = Network::new(SimulationConfig {
        seed: config().seed + 1,
        ..config()
    })
    .unwrap();
    assert_ne!(a.genesis().id, b.genesis().id);
}

#[test]
fn test_parallel_delivery_matches_sequential() {
    let mut sequential = Network::new(config()).unwrap();
    let mut parallel = Network::new(SimulationConfig {
        parallel: true,
        ..config()
    })
    .unwrap();
    sequential.run();
    parallel.run();

    assert_eq!(fingerprint(&sequential), fingerprint(&parallel));
}

#[test]
fn test_runtime_summary_is_reproducible() {
    let first = run_simulation(config()).unwrap();
    let second = run_simulation(config()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.online, 10);
    assert_eq!(first.per_validator.len(), 10);
    assert!(first.justified_fraction > 0.0);
}
