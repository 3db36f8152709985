//! # Discovery Adapters
//!
//! Each adapter turns one passive signal source (hosts file, system ARP
//! table, DHCP leases) into a finite batch of `(address, hostname)`
//! candidates for a single refresh cycle. Adapters perform all of their I/O
//! on their own; they never touch the directory — the
//! [refresher](crate::refresher) feeds candidates into
//! [`ClientDirectory::add_host`](crate::directory::ClientDirectory::add_host),
//! so the directory lock is only held for in-memory map operations.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::discovered::DiscoverySource;

pub mod arp;
pub mod dhcp;
pub mod hosts_file;

pub use arp::ArpAdapter;
pub use dhcp::DhcpAdapter;
pub use hosts_file::HostsFileAdapter;

/// A single host/address association proposed by an adapter.
pub type Candidate = (IpAddr, String);

/// One passive discovery signal source.
#[async_trait]
pub trait DiscoveryAdapter: Send + Sync {
    /// Short tag used in log lines.
    fn name(&self) -> &'static str;

    /// Trust rank of every candidate this adapter produces.
    fn priority(&self) -> DiscoverySource;

    /// Collects the candidates for one refresh cycle.
    ///
    /// A failure means "zero candidates this cycle" to the refresher; it is
    /// logged and never fatal.
    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>>;
}
