//! # Finality Metrics
//!
//! Prometheus metrics for watching the engine across a simulation run.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ffg-01-finality = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `finality_checkpoints_justified_total` - Counter of justified checkpoints
//! - `finality_checkpoints_finalized_total` - Counter of finalized checkpoints
//! - `finality_votes_accepted_total` - Counter of votes accepted
//! - `finality_votes_rejected_total` - Counter of rejected votes (by reason)
//! - `finality_slashable_offenses_total` - Counter of slashable offenses detected (by type)
//! - `finality_messages_buffered_total` - Counter of messages parked on a missing block
//!
//! Counters are process-wide: every validator in the run adds to the same series.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total checkpoints justified
    pub static ref CHECKPOINTS_JUSTIFIED: IntCounter = register_int_counter!(
        "finality_checkpoints_justified_total",
        "Total number of checkpoints justified"
    )
    .expect("Failed to create CHECKPOINTS_JUSTIFIED metric");

    /// Total checkpoints finalized
    pub static ref CHECKPOINTS_FINALIZED: IntCounter = register_int_counter!(
        "finality_checkpoints_finalized_total",
        "Total number of checkpoints finalized"
    )
    .expect("Failed to create CHECKPOINTS_FINALIZED metric");

    /// Total votes accepted
    pub static ref VOTES_ACCEPTED: IntCounter = register_int_counter!(
        "finality_votes_accepted_total",
        "Total number of votes accepted"
    )
    .expect("Failed to create VOTES_ACCEPTED metric");

    /// Total votes rejected, labeled by reason
    pub static ref VOTES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "finality_votes_rejected_total",
        "Total number of votes rejected",
        &["reason"]
    )
    .expect("Failed to create VOTES_REJECTED metric");

    /// Total slashable offenses detected, labeled by type
    pub static ref SLASHABLE_OFFENSES: IntCounterVec = register_int_counter_vec!(
        "finality_slashable_offenses_total",
        "Total number of slashable offenses detected",
        &["type"]
    )
    .expect("Failed to create SLASHABLE_OFFENSES metric");

    /// Total messages parked on a missing dependency
    pub static ref MESSAGES_BUFFERED: IntCounter = register_int_counter!(
        "finality_messages_buffered_total",
        "Total number of messages buffered on a missing block"
    )
    .expect("Failed to create MESSAGES_BUFFERED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a checkpoint justified
#[cfg(feature = "metrics")]
pub fn record_checkpoint_justified() {
    CHECKPOINTS_JUSTIFIED.inc();
}

/// Record a checkpoint finalized
#[cfg(feature = "metrics")]
pub fn record_checkpoint_finalized() {
    CHECKPOINTS_FINALIZED.inc();
}

/// Record a vote accepted
#[cfg(feature = "metrics")]
pub fn record_vote_accepted() {
    VOTES_ACCEPTED.inc();
}

/// Record vote rejected with reason
#[cfg(feature = "metrics")]
pub fn record_vote_rejected(reason: &str) {
    VOTES_REJECTED.with_label_values(&[reason]).inc();
}

/// Record slashable offense detected
#[cfg(feature = "metrics")]
pub fn record_slashable_offense(offense_type: &str) {
    SLASHABLE_OFFENSES.with_label_values(&[offense_type]).inc();
}

/// Record a message parked on a missing dependency
#[cfg(feature = "metrics")]
pub fn record_message_buffered() {
    MESSAGES_BUFFERED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_checkpoint_justified() {}

#[cfg(not(feature = "metrics"))]
pub fn record_checkpoint_finalized() {}

#[cfg(not(feature = "metrics"))]
pub fn record_vote_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_vote_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_slashable_offense(_offense_type: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_message_buffered() {}
