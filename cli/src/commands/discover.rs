use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::PathBuf;

use tracing::warn;

use lanid_core::adapters::{ArpAdapter, DiscoveryAdapter, HostsFileAdapter};
use lanid_core::directory::ClientDirectory;
use lanid_core::upstream::AllowAllUpstreams;

use crate::terminal::print;

/// Runs a single discovery cycle against the live system (hosts file and
/// ARP table) and prints every address the directory ends up knowing about.
pub async fn discover(hosts_path: Option<PathBuf>) -> anyhow::Result<()> {
    let directory = ClientDirectory::new(None, Box::new(AllowAllUpstreams));

    let hosts_adapter = match hosts_path {
        Some(path) => HostsFileAdapter::with_path(path),
        None => HostsFileAdapter::new(),
    };
    let adapters: Vec<Box<dyn DiscoveryAdapter>> =
        vec![Box::new(hosts_adapter), Box::new(ArpAdapter::new())];

    let mut seen: BTreeSet<IpAddr> = BTreeSet::new();
    for adapter in &adapters {
        let candidates = match adapter.candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("{} discovery failed: {e:#}", adapter.name());
                continue;
            }
        };
        for (addr, host) in candidates {
            if directory.add_host(addr, &host, adapter.priority()) {
                seen.insert(addr);
            }
        }
    }

    for addr in &seen {
        if let Some(entry) = directory.find_auto(*addr) {
            print::host_row(*addr, &entry);
        }
    }
    print::summary(seen.len());

    Ok(())
}
