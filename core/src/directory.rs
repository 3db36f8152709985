//! # Client Identity Directory
//!
//! The concurrent store behind per-device network policy. It owns two
//! registries that form one logically atomic unit under a single lock:
//!
//! * configured clients, indexed by unique name and by typed identifier;
//! * auto-discovered hosts, keyed by address and tagged with a
//!   [`DiscoverySource`] rank.
//!
//! A configured identifier always *shadows* a discovered entry for the same
//! address, and a discovered entry is only overwritten by an
//! equal-or-higher-priority source. Every read hands out an independent copy;
//! callers never alias directory-internal state.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use lanid_common::network::identifier::ClientId;

use crate::client::{Client, ClientConfig, WhoisInfo};
use crate::dhcp::DhcpServer;
use crate::discovered::{DiscoveredHost, DiscoverySource};
use crate::error::ClientError;
use crate::upstream::UpstreamValidator;

/// The directory. Cheap to share behind an [`Arc`]; all operations take
/// `&self` and are safe under concurrent invocation from the background
/// refresher and arbitrary foreground callers.
pub struct ClientDirectory {
    inner: Mutex<DirectoryInner>,
    dhcp: Option<Arc<dyn DhcpServer>>,
    upstreams: Box<dyn UpstreamValidator>,
}

#[derive(Default)]
struct DirectoryInner {
    /// name -> client, with its registration sequence number.
    clients: HashMap<String, ClientEntry>,
    /// identifier -> owning client name. Holds every identifier kind, so
    /// exact address and exact MAC lookups are both index hits.
    id_index: HashMap<ClientId, String>,
    /// address -> auto-discovered host.
    hosts: HashMap<IpAddr, DiscoveredHost>,
    next_seq: u64,
}

struct ClientEntry {
    client: Client,
    /// Registration order; drives snapshot ordering and the subnet
    /// tie-break.
    seq: u64,
}

impl ClientDirectory {
    pub fn new(dhcp: Option<Arc<dyn DhcpServer>>, upstreams: Box<dyn UpstreamValidator>) -> Self {
        Self {
            inner: Mutex::new(DirectoryInner::default()),
            dhcp,
            upstreams,
        }
    }

    fn inner(&self) -> MutexGuard<'_, DirectoryInner> {
        // Mutations validate before locking and only touch the maps inside,
        // so a poisoned lock still guards a consistent view.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads an ordered sequence of client definitions from configuration.
    ///
    /// Invalid or duplicate entries are logged and skipped; the rest of the
    /// sequence still loads.
    pub fn load(&self, objects: Vec<ClientConfig>) {
        for cfg in objects {
            let name = cfg.name.clone();
            match self.add(cfg) {
                Ok(true) => {}
                Ok(false) => debug!("skipping duplicate client {name:?}"),
                Err(e) => debug!("skipping client {name:?}: {e}"),
            }
        }
    }

    /// Adds an explicitly configured client.
    ///
    /// Returns `Ok(false)` if the name is already taken (an expected outcome,
    /// not an error). Discovered entries for any of the new client's
    /// addresses are removed; their WHOIS metadata migrates onto the client
    /// if it has none of its own.
    pub fn add(&self, cfg: ClientConfig) -> Result<bool, ClientError> {
        let client = Client::from_config(cfg, self.upstreams.as_ref())?;

        let mut inner = self.inner();
        if inner.clients.contains_key(&client.name) {
            return Ok(false);
        }
        for id in &client.ids {
            if let Some(owner) = inner.id_index.get(id) {
                return Err(ClientError::IdentifierConflict {
                    id: *id,
                    owner: owner.clone(),
                });
            }
        }
        inner.insert_client(client);
        Ok(true)
    }

    /// Replaces the client stored under `name` with a re-validated `cfg`.
    ///
    /// A full value replace, not a field merge: identifiers removed by the
    /// update are dropped from the index, new ones inserted. The client's own
    /// prior identifiers are not a conflict with itself. WHOIS metadata
    /// already attached to the client is kept.
    pub fn update(&self, name: &str, cfg: ClientConfig) -> Result<(), ClientError> {
        let mut client = Client::from_config(cfg, self.upstreams.as_ref())?;

        let mut inner = self.inner();
        let Some(old) = inner.clients.get(name) else {
            return Err(ClientError::NotFound(name.to_owned()));
        };
        if client.name != name && inner.clients.contains_key(&client.name) {
            return Err(ClientError::DuplicateName(client.name));
        }
        for id in &client.ids {
            if let Some(owner) = inner.id_index.get(id)
                && owner != name
            {
                return Err(ClientError::IdentifierConflict {
                    id: *id,
                    owner: owner.clone(),
                });
            }
        }

        let seq = old.seq;
        let old_whois = old.client.whois_info.clone();
        let Some(old) = inner.clients.remove(name) else {
            return Err(ClientError::NotFound(name.to_owned()));
        };
        for id in &old.client.ids {
            inner.id_index.remove(id);
        }
        if client.whois_info.is_empty() {
            client.whois_info = old_whois;
        }
        inner.insert_client_at(client, seq);
        Ok(())
    }

    /// Removes a client and all its identifier-index entries.
    pub fn remove(&self, name: &str) -> bool {
        let mut inner = self.inner();
        let Some(entry) = inner.clients.remove(name) else {
            return false;
        };
        for id in &entry.client.ids {
            inner.id_index.remove(id);
        }
        trace!("removed client {name:?} [{}]", inner.clients.len());
        true
    }

    /// Resolves an address to a configured client, if any.
    ///
    /// Lookup order:
    /// 1. exact identifier-index hit for the address;
    /// 2. subnet containment — the most specific prefix wins, ties broken by
    ///    earliest registration;
    /// 3. if a DHCP collaborator is present, its reverse address-to-MAC
    ///    lookup followed by an exact MAC identifier hit.
    pub fn find(&self, addr: IpAddr) -> Option<Client> {
        let inner = self.inner();
        if let Some(client) = inner.client_by_id(&ClientId::Ip(addr)) {
            return Some(client.clone());
        }
        if let Some(client) = inner.find_by_subnet(addr) {
            return Some(client.clone());
        }
        drop(inner);

        // The reverse lookup goes out to the collaborator; keep it outside
        // the lock.
        let mac = self.dhcp.as_ref()?.find_mac_by_ip(addr)?;
        let inner = self.inner();
        inner.client_by_id(&ClientId::Mac(mac)).cloned()
    }

    /// Exact lookup of an auto-discovered host. No subnet or MAC fallback.
    pub fn find_auto(&self, addr: IpAddr) -> Option<DiscoveredHost> {
        self.inner().hosts.get(&addr).cloned()
    }

    /// Records a discovered address/hostname association.
    ///
    /// Returns `false` without touching anything when the address is
    /// shadowed by a configured identifier, or when an existing entry was
    /// produced by a higher-priority source. An equal-or-higher-priority
    /// source overwrites both hostname and source.
    pub fn add_host(&self, addr: IpAddr, host: &str, source: DiscoverySource) -> bool {
        let mut inner = self.inner();
        if inner.id_index.contains_key(&ClientId::Ip(addr)) {
            return false;
        }
        match inner.hosts.entry(addr) {
            Entry::Occupied(mut slot) => {
                if source < slot.get().source {
                    return false;
                }
                let entry = slot.get_mut();
                entry.host = host.to_owned();
                entry.source = source;
            }
            Entry::Vacant(slot) => {
                slot.insert(DiscoveredHost {
                    host: host.to_owned(),
                    source,
                    whois_info: Vec::new(),
                });
            }
        }
        trace!("{addr} -> {host:?} [{}]", inner.hosts.len());
        true
    }

    /// Attaches WHOIS metadata to whoever owns `addr`.
    ///
    /// Configured identity always wins: if the address is a configured
    /// identifier the metadata lands on that client; otherwise it lands on
    /// the discovered entry, creating one (source [`DiscoverySource::Whois`])
    /// when none exists.
    pub fn set_whois_info(&self, addr: IpAddr, info: WhoisInfo) {
        let mut inner = self.inner();
        if let Some(name) = inner.id_index.get(&ClientId::Ip(addr)).cloned() {
            if let Some(entry) = inner.clients.get_mut(&name) {
                entry.client.whois_info = info;
                debug!("set WHOIS info for client {name:?}");
            }
            return;
        }

        let entry = inner.hosts.entry(addr).or_insert_with(|| DiscoveredHost {
            host: String::new(),
            source: DiscoverySource::Whois,
            whois_info: Vec::new(),
        });
        entry.whois_info = info;
        debug!("set WHOIS info for discovered host {addr}");
    }

    /// All configured clients in registration order, as independent copies in
    /// the persistence shape. List-valued fields keep their original order.
    pub fn snapshot(&self) -> Vec<ClientConfig> {
        let inner = self.inner();
        let mut entries: Vec<&ClientEntry> = inner.clients.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries.iter().map(|e| e.client.to_config()).collect()
    }
}

impl DirectoryInner {
    fn client_by_id(&self, id: &ClientId) -> Option<&Client> {
        let name = self.id_index.get(id)?;
        self.clients.get(name).map(|e| &e.client)
    }

    fn find_by_subnet(&self, addr: IpAddr) -> Option<&Client> {
        let mut best: Option<(&ClientEntry, u8)> = None;
        for entry in self.clients.values() {
            for id in &entry.client.ids {
                let Some(net) = id.as_subnet() else { continue };
                if !net.contains(addr) {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some((b, prefix)) => {
                        net.prefix() > prefix || (net.prefix() == prefix && entry.seq < b.seq)
                    }
                };
                if better {
                    best = Some((entry, net.prefix()));
                }
            }
        }
        best.map(|(entry, _)| &entry.client)
    }

    fn insert_client(&mut self, client: Client) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.insert_client_at(client, seq);
    }

    /// Indexes `client` under `seq`, claiming any discovered entries its
    /// addresses shadow. Caller has already checked name and identifier
    /// uniqueness.
    fn insert_client_at(&mut self, mut client: Client, seq: u64) {
        for id in &client.ids {
            let ClientId::Ip(ip) = id else { continue };
            if let Some(shadowed) = self.hosts.remove(ip)
                && client.whois_info.is_empty()
            {
                client.whois_info = shadowed.whois_info;
            }
        }
        for id in &client.ids {
            self.id_index.insert(*id, client.name.clone());
        }
        trace!("{:?}: ids {:?} [{}]", client.name, client.ids, self.clients.len() + 1);
        self.clients.insert(client.name.clone(), ClientEntry { client, seq });
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
