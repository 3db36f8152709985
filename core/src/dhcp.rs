//! External DHCP server collaborator.
//!
//! The directory never allocates leases itself; it only consumes the
//! collaborator's lease table and its reverse address-to-MAC lookup.

use std::net::IpAddr;

use pnet::util::MacAddr;

/// A single lease as reported by the collaborating DHCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    pub ip: IpAddr,
    pub mac: MacAddr,
    pub hostname: String,
}

/// Read-only view of a DHCP server's state.
pub trait DhcpServer: Send + Sync {
    /// The hardware address currently leased to `ip`, if any.
    fn find_mac_by_ip(&self, ip: IpAddr) -> Option<MacAddr>;

    /// All current leases.
    fn leases(&self) -> Vec<Lease>;
}
