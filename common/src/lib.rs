//! Shared primitives for the LAN identity directory.
//!
//! Home of the typed client identifier, hostname syntax validation and the
//! runtime configuration shared between the core directory and the CLI.

pub mod config;
pub mod network;
