//! Domain module for Finality subsystem
//!
//! ## Core Modules
//! - checkpoint_tree: nearest-checkpoint index and ancestry
//! - fork_choice: head selection under the highest justified checkpoint
//! - buffer: messages waiting on a missing block
//! - slashing_db: Casper commandment enforcement
//! - justification: link weights, justified and finalized sets

pub mod buffer;
pub mod checkpoint_tree;
pub mod fork_choice;
pub mod justification;
pub mod slashing_db;

pub use buffer::DependencyBuffer;
pub use checkpoint_tree::CheckpointTree;
pub use fork_choice::ForkChoice;
pub use justification::{supermajority_threshold, JustificationTracker, LinkUpdate};
pub use slashing_db::{SlashingDb, SlashingEvidence};
