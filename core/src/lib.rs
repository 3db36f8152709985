//! # LAN Client Identity Directory
//!
//! Answers "who is this address" for the policy-enforcement path. Identity is
//! assembled from explicitly configured clients and from passively discovered
//! host/address associations, with a strict trust ordering between discovery
//! sources. See [`directory::ClientDirectory`] for the full contract.

pub mod adapters;
pub mod client;
pub mod dhcp;
pub mod directory;
pub mod discovered;
pub mod error;
pub mod refresher;
pub mod upstream;
