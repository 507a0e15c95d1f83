//! # ffg-02-network
//!
//! Discrete-time simulated network that drives every validator.
//!
//! ## Tick Phases
//!
//! ```text
//! time T:  [deliver]  every message scheduled for T, to every destination
//!              │      (optionally in parallel, one validator per task)
//!              ▼
//!          [advance]  each online validator's proposer hook, in id order
//!              │
//!              ▼
//!          [drain]    outboxes in id order: latency draws, scheduling
//!              │
//!              ▼
//!          [settle]   rewards, then slashes, each offender once per tick
//!              │
//!              ▼
//!          time T+1
//! ```
//!
//! Validators never see the network directly. Each one gets an [`Outbox`]
//! for the tick, and the network drains them afterwards in a fixed order, so
//! a run is reproducible from its seed whether or not delivery is parallel.

pub mod error;
pub mod latency;
pub mod ledger;
pub mod network;
pub mod outbox;

pub use error::NetworkError;
pub use latency::{ExponentialLatency, FixedLatency, LatencyModel};
pub use ledger::{DepositLedger, Settlement};
pub use network::{Network, TickReport};
pub use outbox::Outbox;
