//! ARP-table discovery.
//!
//! Shells out to the platform `arp -a` utility and parses its
//! `hostname (address) at hw-address on interface` output. The subprocess is
//! bounded by an execution timeout; hitting it yields zero candidates for
//! the cycle.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use lanid_common::network::hostname;

use crate::adapters::{Candidate, DiscoveryAdapter};
use crate::discovered::DiscoverySource;

const DEFAULT_ARP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ArpAdapter {
    timeout: Duration,
}

impl ArpAdapter {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_ARP_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ArpAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscoveryAdapter for ArpAdapter {
    fn name(&self) -> &'static str {
        "arp"
    }

    fn priority(&self) -> DiscoverySource {
        DiscoverySource::Arp
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        // The Windows `arp -a` output has a different shape; no candidates
        // from this source there.
        if cfg!(windows) {
            return Ok(Vec::new());
        }

        trace!("executing arp -a");
        let output = tokio::time::timeout(self.timeout, Command::new("arp").arg("-a").output())
            .await
            .context("'arp -a' timed out")?
            .context("executing 'arp -a'")?;
        anyhow::ensure!(output.status.success(), "'arp -a' exited with {}", output.status);

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_arp_output(&stdout))
    }
}

/// Parses `hostname (address) at hw-address on interface` lines.
///
/// Malformed lines, unparsable addresses and syntactically invalid hostnames
/// are skipped, never fatal.
fn parse_arp_output(data: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    for line in data.lines() {
        let (Some(open), Some(close)) = (line.find(" ("), line.find(") ")) else {
            continue;
        };
        if open >= close {
            continue;
        }

        let host = &line[..open];
        let Ok(addr) = line[open + 2..close].parse::<IpAddr>() else {
            continue;
        };
        if !hostname::is_valid(host) {
            continue;
        }
        out.push((addr, host.to_owned()));
    }
    out
}
