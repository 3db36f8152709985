//! Hosts-file discovery.
//!
//! The system hosts file is the most trusted passive source: entries in it
//! are operator-maintained static configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use crate::adapters::{Candidate, DiscoveryAdapter};
use crate::discovered::DiscoverySource;

pub struct HostsFileAdapter {
    path: PathBuf,
}

impl HostsFileAdapter {
    pub fn new() -> Self {
        Self {
            path: default_hosts_path(),
        }
    }

    /// Reads from `path` instead of the platform hosts file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for HostsFileAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscoveryAdapter for HostsFileAdapter {
    fn name(&self) -> &'static str {
        "hosts-file"
    }

    fn priority(&self) -> DiscoverySource {
        DiscoverySource::HostsFile
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(parse_hosts(&data))
    }
}

fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        let root = std::env::var_os("SystemRoot").unwrap_or_else(|| "C:\\Windows".into());
        PathBuf::from(root).join("system32\\drivers\\etc\\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Extracts `address hostname` pairs, skipping blanks, comments and lines
/// with fewer than two fields. Only the first hostname of a line is taken.
fn parse_hosts(data: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(addr), Some(host)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Ok(addr) = addr.parse::<IpAddr>() else {
            continue;
        };
        out.push((addr, host.to_owned()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_skips_noise() {
        let data = "\
# static fleet\n\
127.0.0.1   localhost\n\
\n\
192.168.1.5 printer printer.lan   # office\n\
not-an-ip   junk\n\
192.168.1.6\n\
::1         ip6-localhost\n";

        let candidates = parse_hosts(data);
        assert_eq!(
            candidates,
            vec![
                ("127.0.0.1".parse().unwrap(), "localhost".to_owned()),
                ("192.168.1.5".parse().unwrap(), "printer".to_owned()),
                ("::1".parse().unwrap(), "ip6-localhost".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_error_not_a_panic() {
        let adapter = HostsFileAdapter::with_path("/definitely/not/a/hosts/file");
        assert!(adapter.candidates().await.is_err());
    }
}
