//! # ffg-01-finality
//!
//! Finality Gadget implementing Casper FFG, executed independently by every
//! validator in the simulation.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Checkpoint tree**: nearest-checkpoint mapping and per-epoch tails
//! - **Fork choice**: highest justified checkpoint, longest chain beneath it
//! - **Causal buffering**: out-of-order blocks and votes wait for their parents
//! - **2/3 Threshold**: supermajority deposit required for justification
//! - **Slashing**: double votes and surround votes are rejected and reported
//!
//! ## Architecture
//!
//! ```text
//!              deliver(Message)                     on_tick(time)
//! Network ─────────────────────→ Validator ←─────────────────────── Network
//!    ↑                              │
//!    │        NetworkGateway        ├── broadcast(Block | Vote)
//!    └──────────────────────────────┼── report_slash(offender)
//!                                   └── report_reward(voter)
//! ```
//!
//! A validator never touches another validator's state. Everything it learns
//! arrives through `deliver`, and everything it says leaves through the
//! [`ports::NetworkGateway`] it is handed for the call.
//!
//! ## Delivery State Machine
//!
//! ```text
//! [Duplicate] ←── id seen ──── deliver ──── dependency missing ──→ [Pending]
//!                                 │                                   │
//!                        checks pass / fail                 dependency arrives
//!                                 │                                   │
//!                      [Accepted] / [Rejected]  ←─────────── replayed ┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use ffg_01_finality::{FinalityConfig, Validator};
//!
//! let mut validator = Validator::new(ValidatorId(0), &genesis, FinalityConfig::from(&config), rng);
//! let outcome = validator.deliver(Message::Block(block), &mut gateway);
//! assert!(validator.is_justified(&genesis.id));
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod strategy;
pub mod types;

pub use domain::{CheckpointTree, DependencyBuffer, JustificationTracker, SlashingDb, SlashingEvidence};
pub use error::VoteRejection;
pub use ports::NetworkGateway;
pub use service::Validator;
pub use strategy::{Honest, ReplayStrategy, VoteStrategy};
pub use types::{DeliveryOutcome, FinalityConfig};
