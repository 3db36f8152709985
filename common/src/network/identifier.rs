//! # Client Identifier Model
//!
//! A client can be matched by a single address, by a subnet or by a hardware
//! address. Raw strings are classified **once** at validation time into a
//! [`ClientId`]; lookups compare typed values and never re-parse.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use thiserror::Error;

/// A string could not be classified as an address, a subnet or a MAC.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid client identifier: {0:?}")]
pub struct InvalidIdentifier(pub String);

/// A client-matching key.
///
/// Classification order for a raw string: single IP address, then CIDR
/// subnet, then MAC address. Addresses are stored in canonical textual form
/// (the form [`fmt::Display`] yields), so index lookups by canonical string
/// and by value agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientId {
    /// A single network address.
    Ip(IpAddr),
    /// An address block; matches any address the network contains.
    Subnet(IpNetwork),
    /// A hardware (MAC) address.
    Mac(MacAddr),
}

impl ClientId {
    /// The subnet, if this identifier is one.
    pub fn as_subnet(&self) -> Option<&IpNetwork> {
        match self {
            Self::Subnet(net) => Some(net),
            _ => None,
        }
    }

    /// The hardware address, if this identifier is one.
    pub fn as_mac(&self) -> Option<MacAddr> {
        match self {
            Self::Mac(mac) => Some(*mac),
            _ => None,
        }
    }
}

impl FromStr for ClientId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<IpAddr>() {
            return Ok(Self::Ip(addr));
        }
        // A bare address never reaches this branch, so only true CIDR
        // notation classifies as a subnet.
        if s.contains('/')
            && let Ok(net) = s.parse::<IpNetwork>()
        {
            return Ok(Self::Subnet(net));
        }
        if let Ok(mac) = s.parse::<MacAddr>() {
            return Ok(Self::Mac(mac));
        }
        Err(InvalidIdentifier(s.to_owned()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(addr) => addr.fmt(f),
            Self::Subnet(net) => net.fmt(f),
            Self::Mac(mac) => mac.fmt(f),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
