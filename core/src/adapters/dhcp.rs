//! DHCP-lease discovery.
//!
//! Queries the external DHCP collaborator for its current lease table and
//! proposes one candidate per lease that carries a hostname.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::{Candidate, DiscoveryAdapter};
use crate::dhcp::DhcpServer;
use crate::discovered::DiscoverySource;

pub struct DhcpAdapter {
    server: Arc<dyn DhcpServer>,
}

impl DhcpAdapter {
    pub fn new(server: Arc<dyn DhcpServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl DiscoveryAdapter for DhcpAdapter {
    fn name(&self) -> &'static str {
        "dhcp"
    }

    fn priority(&self) -> DiscoverySource {
        DiscoverySource::Dhcp
    }

    async fn candidates(&self) -> anyhow::Result<Vec<Candidate>> {
        let candidates = self
            .server
            .leases()
            .into_iter()
            .filter(|lease| !lease.hostname.is_empty())
            .map(|lease| (lease.ip, lease.hostname))
            .collect();
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dhcp::Lease;
    use pnet::util::MacAddr;
    use std::net::IpAddr;

    struct StaticDhcp(Vec<Lease>);

    impl DhcpServer for StaticDhcp {
        fn find_mac_by_ip(&self, ip: IpAddr) -> Option<MacAddr> {
            self.0.iter().find(|l| l.ip == ip).map(|l| l.mac)
        }

        fn leases(&self) -> Vec<Lease> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn skips_leases_without_hostname() {
        let mac = MacAddr::new(0, 1, 2, 3, 4, 5);
        let server = Arc::new(StaticDhcp(vec![
            Lease {
                ip: "10.0.0.2".parse().unwrap(),
                mac,
                hostname: "tv".to_owned(),
            },
            Lease {
                ip: "10.0.0.3".parse().unwrap(),
                mac,
                hostname: String::new(),
            },
        ]));

        let adapter = DhcpAdapter::new(server);
        let candidates = adapter.candidates().await.unwrap();
        assert_eq!(candidates, vec![("10.0.0.2".parse().unwrap(), "tv".to_owned())]);
    }
}
