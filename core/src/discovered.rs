//! Passively discovered host/address associations.

use crate::client::WhoisInfo;

/// The mechanism that produced a discovered host entry, ordered by trust.
///
/// The derived [`Ord`] follows declaration order, lowest trust first:
/// `Whois < Rdns < Dhcp < Arp < HostsFile`. On a conflicting insert the
/// higher-ranked source wins; an **equal** rank may refresh the entry, so
/// comparisons use `>=` ("higher value wins ties").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiscoverySource {
    Whois,
    Rdns,
    Dhcp,
    Arp,
    HostsFile,
}

impl DiscoverySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whois => "whois",
            Self::Rdns => "rdns",
            Self::Dhcp => "dhcp",
            Self::Arp => "arp",
            Self::HostsFile => "hosts-file",
        }
    }
}

/// An auto-discovered host, keyed by address in the directory.
///
/// Entries are never actively expired; they persist until overwritten by an
/// equal-or-higher-priority source or until a configured client claims the
/// same address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHost {
    pub host: String,
    pub source: DiscoverySource,
    pub whois_info: WhoisInfo,
}
