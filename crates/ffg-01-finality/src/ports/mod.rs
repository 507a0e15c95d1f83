//! Ports module for Finality subsystem

pub mod outbound;

pub use outbound::NetworkGateway;
