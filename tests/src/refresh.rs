#![cfg(test)]
//! End-to-end tests of the refresher/directory interplay using scripted
//! adapters and a fake DHCP collaborator.

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pnet::util::MacAddr;

use lanid_core::adapters::{Candidate, DhcpAdapter, DiscoveryAdapter};
use lanid_core::client::ClientConfig;
use lanid_core::dhcp::{DhcpServer, Lease};
use lanid_core::directory::ClientDirectory;
use lanid_core::discovered::DiscoverySource;
use lanid_core::refresher::{self, Refresher};
use lanid_core::upstream::AllowAllUpstreams;

fn directory() -> ClientDirectory {
    ClientDirectory::new(None, Box::new(AllowAllUpstreams))
}

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Replays a fixed candidate list at a fixed priority.
struct ScriptedAdapter {
    source: DiscoverySource,
    candidates: Vec<Candidate>,
}

impl ScriptedAdapter {
    fn new(source: DiscoverySource, candidates: &[(&str, &str)]) -> Self {
        Self {
            source,
            candidates: candidates
                .iter()
                .map(|(addr, host)| (ip(addr), (*host).to_owned()))
                .collect(),
        }
    }
}

#[async_trait]
impl DiscoveryAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        self.source.as_str()
    }

    fn priority(&self) -> DiscoverySource {
        self.source
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }
}

/// Always fails, like an unreadable hosts file or a missing arp binary.
struct FailingAdapter;

#[async_trait]
impl DiscoveryAdapter for FailingAdapter {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn priority(&self) -> DiscoverySource {
        DiscoverySource::HostsFile
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        anyhow::bail!("signal source unavailable")
    }
}

/// Counts refresh cycles; produces nothing.
struct CountingAdapter {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DiscoveryAdapter for CountingAdapter {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn priority(&self) -> DiscoverySource {
        DiscoverySource::Rdns
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct StaticDhcp {
    leases: Vec<Lease>,
}

impl DhcpServer for StaticDhcp {
    fn find_mac_by_ip(&self, ip: IpAddr) -> Option<MacAddr> {
        self.leases.iter().find(|l| l.ip == ip).map(|l| l.mac)
    }

    fn leases(&self) -> Vec<Lease> {
        self.leases.clone()
    }
}

#[tokio::test]
async fn one_cycle_applies_source_priorities() {
    let dir = directory();
    let adapters: Vec<Box<dyn DiscoveryAdapter>> = vec![
        Box::new(ScriptedAdapter::new(
            DiscoverySource::Arp,
            &[("10.0.0.5", "printer"), ("10.0.0.6", "nas")],
        )),
        Box::new(ScriptedAdapter::new(
            DiscoverySource::HostsFile,
            &[("10.0.0.5", "printer.local")],
        )),
        Box::new(ScriptedAdapter::new(
            DiscoverySource::Dhcp,
            &[("10.0.0.5", "printer-dhcp"), ("10.0.0.7", "tv")],
        )),
    ];

    refresher::refresh_once(&dir, &adapters).await;

    // The hosts file beat ARP for .5 and the later DHCP signal lost.
    let entry = dir.find_auto(ip("10.0.0.5")).unwrap();
    assert_eq!(entry.host, "printer.local");
    assert_eq!(entry.source, DiscoverySource::HostsFile);

    assert_eq!(dir.find_auto(ip("10.0.0.6")).unwrap().source, DiscoverySource::Arp);
    assert_eq!(dir.find_auto(ip("10.0.0.7")).unwrap().source, DiscoverySource::Dhcp);
}

#[tokio::test]
async fn adapter_failure_never_kills_the_cycle() {
    let dir = directory();
    let adapters: Vec<Box<dyn DiscoveryAdapter>> = vec![
        Box::new(FailingAdapter),
        Box::new(ScriptedAdapter::new(
            DiscoverySource::Arp,
            &[("10.0.0.5", "printer")],
        )),
    ];

    refresher::refresh_once(&dir, &adapters).await;

    assert!(dir.find_auto(ip("10.0.0.5")).is_some());
}

#[tokio::test]
async fn configured_clients_shadow_discovery() {
    let dir = directory();
    dir.add(ClientConfig {
        name: "printer".to_owned(),
        ids: vec!["10.0.0.5".to_owned()],
        ..ClientConfig::default()
    })
    .unwrap();

    let adapters: Vec<Box<dyn DiscoveryAdapter>> = vec![Box::new(ScriptedAdapter::new(
        DiscoverySource::HostsFile,
        &[("10.0.0.5", "ghost"), ("10.0.0.6", "nas")],
    ))];
    refresher::refresh_once(&dir, &adapters).await;

    assert!(dir.find_auto(ip("10.0.0.5")).is_none());
    assert_eq!(dir.find(ip("10.0.0.5")).unwrap().name, "printer");
    assert!(dir.find_auto(ip("10.0.0.6")).is_some());
}

#[tokio::test]
async fn dhcp_leases_feed_discovery_and_mac_fallback() {
    let mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0x00, 0x11, 0x22);
    let dhcp = Arc::new(StaticDhcp {
        leases: vec![
            Lease {
                ip: ip("10.0.0.9"),
                mac,
                hostname: "phone".to_owned(),
            },
            Lease {
                ip: ip("10.0.0.10"),
                mac: MacAddr::zero(),
                hostname: String::new(),
            },
        ],
    });

    let dir = ClientDirectory::new(Some(Arc::clone(&dhcp) as Arc<dyn DhcpServer>), Box::new(AllowAllUpstreams));
    dir.add(ClientConfig {
        name: "phone".to_owned(),
        ids: vec!["aa:bb:cc:00:11:22".to_owned()],
        ..ClientConfig::default()
    })
    .unwrap();

    let adapters: Vec<Box<dyn DiscoveryAdapter>> = vec![Box::new(DhcpAdapter::new(dhcp))];
    refresher::refresh_once(&dir, &adapters).await;

    // Hostname-less leases are not candidates.
    assert!(dir.find_auto(ip("10.0.0.10")).is_none());
    assert_eq!(dir.find_auto(ip("10.0.0.9")).unwrap().source, DiscoverySource::Dhcp);

    // The configured client is still resolvable through the reverse lookup.
    assert_eq!(dir.find(ip("10.0.0.9")).unwrap().name, "phone");
}

#[tokio::test(start_paused = true)]
async fn refresher_runs_periodically_and_stops_on_signal() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dir = Arc::new(directory());
    let adapters: Vec<Box<dyn DiscoveryAdapter>> = vec![Box::new(CountingAdapter {
        calls: Arc::clone(&calls),
    })];

    let interval = Duration::from_secs(60 * 60);
    let refresher = Refresher::spawn(Arc::clone(&dir), adapters, interval);

    tokio::time::sleep(interval * 3 + Duration::from_secs(1)).await;
    assert!(calls.load(Ordering::SeqCst) >= 3, "refresher did not cycle");

    refresher.stop().await;
    let after_stop = calls.load(Ordering::SeqCst);
    tokio::time::sleep(interval * 2).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_stop, "task kept running after stop");
}
