//! # Shared Types Crate
//!
//! Entities exchanged between validators and the simulated network, plus the
//! configuration every subsystem is constructed from.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Block, Vote and the `Message` union are
//!   defined here and nowhere else.
//! - **Arena by id**: blocks reference their parent by `BlockId`, never by an
//!   owning pointer. Blocks are shared read-only as `Arc<Block>`.
//! - **Fail fast**: `SimulationConfig::validate` rejects malformed constants
//!   before any validator is built.

pub mod config;
pub mod entities;
pub mod errors;
pub mod validator_set;

pub use config::SimulationConfig;
pub use entities::*;
pub use errors::ConfigError;
pub use validator_set::ValidatorSet;
