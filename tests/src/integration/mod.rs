//! # Integration Scenarios
//!
//! Whole-network runs plus single validators driven message by message.

pub mod support;

#[cfg(test)]
mod byzantine;
#[cfg(test)]
mod delivery;
#[cfg(test)]
mod determinism;
#[cfg(test)]
mod dynasty;
#[cfg(test)]
mod partition;
#[cfg(test)]
mod safety;
