//! # Simulation Throughput Benchmarks
//!
//! | Scenario | Measures |
//! |----------|----------|
//! | `epoch` | One epoch of ticks, sequential vs. parallel delivery |
//! | `deliver_backlog` | Replay of a reverse-ordered chain through the buffer |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ffg_02_network::Network;
use ffg_tests::integration::support::{chain, finality_config, genesis, validator, CollectingGateway};
use shared_types::{Message, SimulationConfig};
use std::sync::Arc;
use std::time::Duration;

fn bench_epoch(c: &mut Criterion) {
    let mut group = c.benchmark_group("epoch");
    group.measurement_time(Duration::from_secs(10));

    for validators in [10usize, 50, 100] {
        for parallel in [false, true] {
            let config = SimulationConfig {
                num_validators: validators,
                epochs: 1,
                parallel,
                ..Default::default()
            };
            let ticks = config.total_ticks();
            let label = if parallel { "parallel" } else { "sequential" };

            group.throughput(Throughput::Elements(ticks));
            group.bench_with_input(BenchmarkId::new(label, validators), &config, |b, config| {
                b.iter(|| {
                    let mut network = Network::new(config.clone()).unwrap();
                    network.run();
                    black_box(network.total_deposit())
                })
            });
        }
    }
    group.finish();
}

fn bench_deliver_backlog(c: &mut Criterion) {
    let mut group = c.benchmark_group("deliver_backlog");

    for len in [100usize, 1_000, 10_000] {
        let root = genesis(4);
        let blocks = chain(&root, 100, len);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &blocks, |b, blocks| {
            b.iter(|| {
                let mut v = validator(9, &root, finality_config(4));
                let mut gw = CollectingGateway::with_total(400);
                for block in blocks.iter().rev() {
                    v.deliver(Message::Block(Arc::clone(block)), &mut gw);
                }
                black_box(v.head().height)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_epoch, bench_deliver_backlog);
criterion_main!(benches);
