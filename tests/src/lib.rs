//! # FFG-Sim Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── tick_throughput.rs   # Criterion: ticks per second by network size
//! │
//! └── src/integration/         # Cross-crate scenarios
//!     ├── support.rs           # Fixtures and a collecting gateway
//!     ├── safety.rs            # Finalized checkpoints never conflict
//!     ├── delivery.rs          # Out-of-order and duplicate delivery
//!     ├── byzantine.rs         # Replay attackers get slashed
//!     ├── partition.rs         # Offline share vs. the 2/3 threshold
//!     ├── dynasty.rs           # Validator-set rotation
//!     └── determinism.rs       # Seeds, parallel delivery, runtime summary
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ffg-tests
//!
//! # By scenario
//! cargo test -p ffg-tests integration::safety::
//!
//! # Benchmarks
//! cargo bench -p ffg-tests
//! ```

pub mod integration;
